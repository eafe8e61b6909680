//! Core types: date formats, events, admin listing, meta box, upcoming widget

pub mod admin;
pub mod datepicker;
pub mod event;
pub mod html;
pub mod metabox;
pub mod phpdate;
pub mod settings;
pub mod tracing;
pub mod widget;

pub use admin::{Column, DatepickerOptions, datepicker_options, render_cell, sort_for_admin};
pub use datepicker::{TranslateError, datepicker_token, php_to_datepicker};
pub use event::{Event, EventError, Term};
pub use html::{html_escape, strip_tags};
pub use metabox::{MetaBoxError, MetaBoxForm};
pub use phpdate::{DateParseError, format_date_time, format_php_date, parse_php_date, parse_php_time};
pub use settings::{MetaKeys, SiteSettings};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use widget::{WidgetChrome, WidgetInstance, select_upcoming};
