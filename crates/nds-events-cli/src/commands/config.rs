//! Configuration commands.

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Dumps the current configuration as TOML.
pub fn dump(config: &Config) -> CliResult<String> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| CliError::Config(format!("failed to serialize config: {}", e)))?;
    Ok(format!(
        "# config.toml ({})\n{}",
        Config::default_path().display(),
        toml_str
    ))
}

/// Validates the configuration.
pub fn validate(config: &Config) -> CliResult<String> {
    config.validate().map_err(CliError::Config)?;
    Ok("Configuration is valid.".to_string())
}

/// Shows the configuration file path.
pub fn path() -> CliResult<String> {
    Ok(format!("config: {}", Config::default_path().display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_includes_site_section() {
        let out = dump(&Config::default()).unwrap();
        assert!(out.starts_with("# config.toml ("));
        assert!(out.contains("post_type = \"nds_wp_event\""));
    }

    #[test]
    fn validate_reports_errors() {
        let mut config = Config::default();
        assert_eq!(validate(&config).unwrap(), "Configuration is valid.");
        config.widget.limit = 0;
        let err = validate(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: widget.limit must be at least 1"
        );
    }
}
