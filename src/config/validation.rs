use crate::config::types::CrawlConfig;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be a positive integer, got {}",
            config.concurrency
        )));
    }

    Ok(())
}
