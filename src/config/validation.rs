use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.persist_interval < 1 {
        return Err(ConfigError::Validation(format!(
            "persist_interval must be >= 1, got {}",
            config.persist_interval
        )));
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be >= 1, got {}",
            config.fetch_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > config.fetch_timeout_secs
    {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be between 1 and fetch_timeout_secs ({}), got {}",
            config.fetch_timeout_secs, config.connect_timeout_secs
        )));
    }

    if config.max_body_bytes < 1 {
        return Err(ConfigError::Validation(
            "max_body_bytes must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_crawler_config() {
        let mut config = CrawlerConfig::default();
        assert!(validate_crawler_config(&config).is_ok());

        config.persist_interval = 0;
        assert!(validate_crawler_config(&config).is_err());

        config = CrawlerConfig::default();
        config.fetch_timeout_secs = 0;
        assert!(validate_crawler_config(&config).is_err());

        config = CrawlerConfig::default();
        config.connect_timeout_secs = config.fetch_timeout_secs + 1;
        assert!(validate_crawler_config(&config).is_err());

        config = CrawlerConfig::default();
        config.max_body_bytes = 0;
        assert!(validate_crawler_config(&config).is_err());
    }

    #[test]
    fn test_validate_crawler_name() {
        let mut config = UserAgentConfig::default();
        assert!(validate_user_agent_config(&config).is_ok());

        config.crawler_name = String::new();
        assert!(validate_user_agent_config(&config).is_err());

        config.crawler_name = "bad name!".to_string();
        assert!(validate_user_agent_config(&config).is_err());
    }

    #[test]
    fn test_validate_output_directory() {
        let config = OutputConfig {
            directory: PathBuf::new(),
        };
        assert!(validate_output_config(&config).is_err());
    }
}
