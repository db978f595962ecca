use crate::config::types::{Config, DisallowEntry, FetchConfig, UserAgentConfig, WalkConfig};
use crate::title::PageId;
use crate::ConfigError;
use url::Url;

/// Longest pause allowed between hops
const MAX_DELAY_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_walk_config(&config.walk)?;
    validate_base_url(&config.wiki.base_url)?;
    validate_fetch_config(&config.fetch)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_disallow_entries(&config.disallow)?;
    Ok(())
}

/// Validates walk configuration
fn validate_walk_config(config: &WalkConfig) -> Result<(), ConfigError> {
    if config.max_hops < 1 {
        return Err(ConfigError::Validation(format!(
            "max_hops must be >= 1, got {}",
            config.max_hops
        )));
    }

    if config.min_delay_ms > config.max_delay_ms {
        return Err(ConfigError::Validation(format!(
            "min_delay_ms ({}) cannot exceed max_delay_ms ({})",
            config.min_delay_ms, config.max_delay_ms
        )));
    }

    if config.max_delay_ms > MAX_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "max_delay_ms must be <= {}ms, got {}ms",
            MAX_DELAY_MS, config.max_delay_ms
        )));
    }

    PageId::parse(&config.target).map_err(|e| {
        ConfigError::Validation(format!("Invalid target '{}': {}", config.target, e))
    })?;

    if config.start.is_empty() {
        return Err(ConfigError::Validation(
            "start must name at least one page".to_string(),
        ));
    }

    for start in &config.start {
        PageId::parse(start).map_err(|e| {
            ConfigError::Validation(format!("Invalid start page '{}': {}", start, e))
        })?;
    }

    Ok(())
}

/// Validates the wiki base URL: http(s) with a host
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use HTTP or HTTPS",
            base_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' has no host",
            base_url
        )));
    }

    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
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

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

fn validate_disallow_entries(entries: &[DisallowEntry]) -> Result<(), ConfigError> {
    for entry in entries {
        entry.to_rule()?;
    }
    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let (local, domain) = email.split_once('@').ok_or_else(|| {
        ConfigError::Validation(format!("Invalid email format: '{}'", email))
    })?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
