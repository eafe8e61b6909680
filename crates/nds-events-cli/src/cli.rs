//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// nds-events - Event dates, listings and the upcoming events widget
#[derive(Debug, Parser)]
#[command(name = "nds-events")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "NDS_EVENTS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate a PHP date() pattern into a jQuery UI Datepicker pattern
    Datepicker {
        /// PHP date() pattern (defaults to the configured date format)
        format: Option<String>,

        /// Print the date picker options object as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a timestamp with a PHP date() pattern
    Date {
        /// PHP date() pattern (defaults to the configured date and time formats)
        #[arg(long, short)]
        format: Option<String>,

        /// Unix timestamp to render (defaults to now)
        #[arg(long, short, allow_negative_numbers = true)]
        timestamp: Option<i64>,
    },

    /// Render the upcoming events widget as HTML
    Upcoming {
        /// JSON file with an array of events ("-" reads stdin)
        #[arg(long, short)]
        events: PathBuf,

        /// Maximum number of events (overrides the configured limit)
        #[arg(long, short)]
        limit: Option<usize>,

        /// Widget title (overrides the configured title)
        #[arg(long)]
        title: Option<String>,

        /// Unix timestamp to treat as "now"
        #[arg(long)]
        now: Option<i64>,
    },

    /// Print the admin events listing
    Admin {
        /// JSON file with an array of events ("-" reads stdin)
        #[arg(long, short)]
        events: PathBuf,

        /// Only show events in this category slug
        #[arg(long)]
        category: Option<String>,
    },

    /// Show or save the event details meta box
    MetaBox {
        #[command(subcommand)]
        action: MetaBoxAction,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Meta box actions.
#[derive(Debug, Subcommand)]
pub enum MetaBoxAction {
    /// Render the meta box HTML for an event
    Show {
        /// JSON object of the event's post meta ("-" reads stdin; omit for a new event)
        #[arg(long, short)]
        meta: Option<PathBuf>,

        /// Event post id
        #[arg(long, default_value_t = 0)]
        id: u64,

        /// Nonce value placed in the hidden input
        #[arg(long, env = "NDS_EVENTS_NONCE", default_value = "")]
        nonce: String,

        /// Unix timestamp used to prefill a new event
        #[arg(long, allow_negative_numbers = true)]
        now: Option<i64>,
    },

    /// Read a submitted meta box and print the post meta to store
    Save {
        /// JSON object of the submitted form fields ("-" reads stdin)
        #[arg(long, short)]
        form: PathBuf,

        /// Event post id
        #[arg(long, default_value_t = 0)]
        id: u64,

        /// Nonce the submission must carry
        #[arg(long, env = "NDS_EVENTS_NONCE")]
        nonce: String,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_datepicker_with_escapes() {
        let cli = Cli::try_parse_from(["nds-events", "datepicker", r"j \o\f F Y"]).unwrap();
        match cli.command {
            Command::Datepicker { format, json } => {
                assert_eq!(format.as_deref(), Some(r"j \o\f F Y"));
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_upcoming_flags() {
        let cli = Cli::try_parse_from([
            "nds-events",
            "--debug",
            "upcoming",
            "--events",
            "events.json",
            "--limit",
            "3",
            "--now",
            "1393541520",
        ])
        .unwrap();
        assert!(cli.debug);
        match cli.command {
            Command::Upcoming {
                events, limit, now, title,
            } => {
                assert_eq!(events, PathBuf::from("events.json"));
                assert_eq!(limit, Some(3));
                assert_eq!(now, Some(1_393_541_520));
                assert!(title.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_meta_box_save() {
        let cli = Cli::try_parse_from([
            "nds-events",
            "meta-box",
            "save",
            "--form",
            "-",
            "--id",
            "7",
            "--nonce",
            "abc",
        ])
        .unwrap();
        match cli.command {
            Command::MetaBox {
                action: MetaBoxAction::Save { form, id, nonce },
            } => {
                assert_eq!(form, PathBuf::from("-"));
                assert_eq!(id, 7);
                assert_eq!(nonce, "abc");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn meta_box_show_defaults_to_new_event() {
        let cli = Cli::try_parse_from(["nds-events", "meta-box", "show", "--nonce", "n"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::MetaBox {
                action: MetaBoxAction::Show {
                    meta: None,
                    id: 0,
                    now: None,
                    ..
                },
            }
        ));
    }

    #[test]
    fn negative_timestamps_are_accepted() {
        let cli = Cli::try_parse_from(["nds-events", "date", "--timestamp", "-86400"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Date {
                timestamp: Some(-86400),
                ..
            }
        ));
    }
}
