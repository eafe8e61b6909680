//! Admin listing command.

use nds_events_core::admin::{self, Column};
use nds_events_core::{Event, html_escape};

use crate::config::Config;
use crate::error::CliResult;

/// Renders the admin list table for `events`, newest first, optionally
/// restricted to one category.
pub fn run(events: &[Event], category: Option<&str>, config: &Config) -> CliResult<String> {
    let mut events: Vec<Event> = admin::filter_by_category(events, category)
        .into_iter()
        .cloned()
        .collect();
    admin::sort_for_admin(&mut events);

    let keys = config.site.meta_keys();
    let sortable = admin::sortable_columns(&keys);

    let mut out = vec![
        format!(
            "<table class=\"wp-list-table widefat fixed posts {}\">",
            html_escape(&config.site.post_type)
        ),
        "<thead><tr>".to_string(),
    ];
    for column in Column::ALL {
        match sortable.iter().find(|(id, _)| *id == column.id()) {
            Some((id, key)) => out.push(format!(
                "<th id=\"{id}\" class=\"sortable\" data-orderby=\"{key}\">{}</th>",
                column.label()
            )),
            None => out.push(format!("<th id=\"{}\">{}</th>", column.id(), column.label())),
        }
    }
    out.push("</tr></thead>".to_string());
    out.push("<tbody>".to_string());

    if events.is_empty() {
        out.push(format!(
            "<tr class=\"no-items\"><td colspan=\"{}\">No events found.</td></tr>",
            Column::ALL.len()
        ));
    }
    for event in &events {
        out.push(format!("<tr id=\"post-{}\">", event.id));
        for column in Column::ALL {
            out.push(format!(
                "<td class=\"{}\">{}</td>",
                column.id(),
                admin::render_cell(column, event, &config.site)?
            ));
        }
        out.push("</tr>".to_string());
    }

    out.push("</tbody>".to_string());
    out.push("</table>".to_string());
    Ok(out.join("\n"))
}
