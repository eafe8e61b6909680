//! Admin listing of events.
//!
//! Describes the columns of the events list screen, which of them sort on
//! which meta field, the default ordering and category filter, and the HTML
//! rendered into each cell. Also builds the options object handed to the
//! date picker on the event edit screen.

use serde::Serialize;
use tracing::{debug, warn};

use crate::datepicker::{TranslateError, php_to_datepicker};
use crate::event::Event;
use crate::html::html_escape;
use crate::phpdate::format_php_date;
use crate::settings::{MetaKeys, SiteSettings};

/// Columns of the events list screen, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Checkbox,
    Title,
    Category,
    Tags,
    Location,
    StartDate,
    EndDate,
}

impl Column {
    /// All columns, in display order.
    pub const ALL: [Column; 7] = [
        Self::Checkbox,
        Self::Title,
        Self::Category,
        Self::Tags,
        Self::Location,
        Self::StartDate,
        Self::EndDate,
    ];

    /// Column identifier used by the list table.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Checkbox => "cb",
            Self::Title => "title",
            Self::Category => "event_category_fmt",
            Self::Tags => "event_tags_fmt",
            Self::StartDate => "event_start_date_fmt",
            Self::EndDate => "event_end_date_fmt",
            Self::Location => "event_location_fmt",
        }
    }

    /// Column header label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Checkbox => "<input type=\"checkbox\" />",
            Self::Title => "Event",
            Self::Category => "Category",
            Self::Tags => "Tags",
            Self::StartDate => "Start Date/Time",
            Self::EndDate => "End Date/Time",
            Self::Location => "Location",
        }
    }

    /// Looks up a column by its identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Returns the meta key or taxonomy this column sorts on, if sortable.
    pub fn sort_key<'a>(&self, keys: &'a MetaKeys) -> Option<&'a str> {
        match self {
            Self::Category => Some(keys.category.as_str()),
            Self::StartDate => Some(keys.start_date.as_str()),
            Self::EndDate => Some(keys.end_date.as_str()),
            _ => None,
        }
    }
}

/// Returns `(column id, sort key)` for every sortable column.
pub fn sortable_columns(keys: &MetaKeys) -> Vec<(&'static str, &str)> {
    Column::ALL
        .iter()
        .filter_map(|c| c.sort_key(keys).map(|key| (c.id(), key)))
        .collect()
}

/// Orders events the way the list screen does by default: newest start first.
pub fn sort_for_admin(events: &mut [Event]) {
    events.sort_by(|a, b| b.start.cmp(&a.start).then_with(|| a.id.cmp(&b.id)));
}

/// Keeps only events in the category with the given slug.
///
/// `None` means "Show All Categories".
pub fn filter_by_category<'a>(events: &'a [Event], slug: Option<&str>) -> Vec<&'a Event> {
    match slug {
        Some(slug) => events.iter().filter(|e| e.in_category(slug)).collect(),
        None => events.iter().collect(),
    }
}

/// Renders the HTML for one cell of the list table.
///
/// # Errors
///
/// Fails if the site's date or time format ends with a lone escape.
pub fn render_cell(
    column: Column,
    event: &Event,
    settings: &SiteSettings,
) -> Result<String, TranslateError> {
    let keys = settings.meta_keys();
    let html = match column {
        Column::Checkbox => format!("<input type=\"checkbox\" name=\"post[]\" value=\"{}\" />", event.id),
        Column::Title => html_escape(&event.title),
        Column::Category => {
            if event.categories.is_empty() {
                "None".to_string()
            } else {
                event
                    .categories
                    .iter()
                    .map(|t| html_escape(&t.name))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
        Column::Tags => {
            if event.tags.is_empty() {
                "None".to_string()
            } else {
                event
                    .tags
                    .iter()
                    .map(|t| {
                        format!(
                            "<a href=\"edit.php?post_type={pt}&amp;taxonomy={tax}&amp;term={term}\">{name}</a>",
                            pt = settings.post_type,
                            tax = keys.tag,
                            term = urlencoding::encode(&t.slug),
                            name = html_escape(&t.name),
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
        Column::StartDate => date_cell(event, &event.start, settings)?,
        Column::EndDate => date_cell(event, &event.end, settings)?,
        Column::Location => html_escape(event.location.as_deref().unwrap_or_default()),
    };
    Ok(html)
}

fn date_cell(
    event: &Event,
    dt: &chrono::DateTime<chrono::Utc>,
    settings: &SiteSettings,
) -> Result<String, TranslateError> {
    let date = format_php_date(dt, &settings.date_format).inspect_err(|e| {
        warn!(event_id = event.id, error = %e, "invalid site date format");
    })?;
    let time = format_php_date(dt, &settings.time_format).inspect_err(|e| {
        warn!(event_id = event.id, error = %e, "invalid site time format");
    })?;
    Ok(format!(
        "{}<br /><em>{}</em>",
        html_escape(&date),
        html_escape(&time)
    ))
}

/// Options passed to the date picker on the event edit screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatepickerOptions {
    /// Date picker pattern equivalent to the site's date format.
    pub date_format: String,
    /// Months shown side by side in the popup.
    pub number_of_months: u8,
    /// CSS selector of the inputs the picker attaches to.
    #[serde(skip)]
    pub selector: String,
}

/// Builds the date picker options for the site's date format.
///
/// # Errors
///
/// Fails if the site's date format ends with a lone escape.
pub fn datepicker_options(settings: &SiteSettings) -> Result<DatepickerOptions, TranslateError> {
    let date_format = php_to_datepicker(&settings.date_format)?;
    debug!(date_format, "built datepicker options");
    Ok(DatepickerOptions {
        date_format,
        number_of_months: 2,
        selector: ".eventdate".to_string(),
    })
}
