//! nds-events CLI entry point.

use std::collections::HashMap;
use std::process::ExitCode;

use clap::Parser;

use nds_events_cli::cli::{Cli, Command, ConfigAction, MetaBoxAction};
use nds_events_cli::commands;
use nds_events_cli::commands::upcoming::UpcomingOptions;
use nds_events_cli::config::Config;
use nds_events_cli::error::{CliError, CliResult};
use nds_events_cli::input::{load_events, load_fields};
use nds_events_core::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<String> {
    // Load configuration
    let config = match cli.config {
        Some(ref path) => Config::load_from(path).map_err(CliError::Config)?,
        None => Config::load().map_err(CliError::Config)?,
    };

    // Initialize tracing
    let tracing_config = if cli.debug || config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    init_tracing(tracing_config.with_format(config.log_format))?;

    match cli.command {
        Command::Datepicker { format, json } => {
            commands::datepicker::run(format.as_deref(), json, &config)
        }
        Command::Date { format, timestamp } => {
            commands::date::run(format.as_deref(), timestamp, &config)
        }
        Command::Upcoming {
            events,
            limit,
            title,
            now,
        } => {
            let events = load_events(&events)?;
            commands::upcoming::run(&events, UpcomingOptions { limit, title, now }, &config)
        }
        Command::Admin { events, category } => {
            let events = load_events(&events)?;
            commands::admin::run(&events, category.as_deref(), &config)
        }
        Command::MetaBox { action } => match action {
            MetaBoxAction::Show {
                meta,
                id,
                nonce,
                now,
            } => {
                let meta = match meta {
                    Some(path) => load_fields(&path)?,
                    None => HashMap::new(),
                };
                commands::metabox::show(id, &meta, &nonce, now, &config)
            }
            MetaBoxAction::Save { form, id, nonce } => {
                let submitted = load_fields(&form)?;
                commands::metabox::save(id, &submitted, &nonce, &config)
            }
        },
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
