use crate::config::types::Config;
use crate::ConfigError;
use std::path::Path;
use url::Url;

/// Loads the configuration, falling back to built-in defaults
///
/// # Arguments
///
/// * `path` - Optional path to a TOML configuration file; `None` uses the
///   built-in defaults for the public HCPCS reference site
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to read, parse, or validate the file
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => Config::default(),
    };

    validate(&config)?;

    Ok(config)
}

/// Validates the configuration
fn validate(config: &Config) -> Result<(), ConfigError> {
    let base = Url::parse(&config.source.base_url).map_err(|e| {
        ConfigError::Validation(format!(
            "base-url is not a valid URL ({}): {}",
            config.source.base_url, e
        ))
    })?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must be http or https, got {}",
            base.scheme()
        )));
    }

    if !config.source.directory_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "directory-path must start with '/', got {}",
            config.source.directory_path
        )));
    }

    if config.source.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.output.csv_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
