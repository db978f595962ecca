use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use philosophy_walk::config::load_config;
///
/// let config = load_config(Path::new("walk.toml")).unwrap();
/// println!("Max hops: {}", config.walk.max_hops);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[walk]
start = ["Sport", "Banana"]
target = "Philosophy"
max-hops = 50
min-delay-ms = 200
max-delay-ms = 400

[wiki]
base-url = "https://de.wikipedia.org"

[fetch]
timeout-secs = 5
max-retries = 1

[user-agent]
crawler-name = "TestWalker"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"

[[disallow]]
prefix = "List of "

[[disallow]]
exact = "Main Page"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.walk.start.len(), 2);
        assert_eq!(config.walk.max_hops, 50);
        assert_eq!(config.wiki.base_url, "https://de.wikipedia.org");
        assert_eq!(config.fetch.timeout_secs, 5);
        assert_eq!(config.fetch.max_retries, 1);
        // Unset keys keep their defaults
        assert_eq!(config.fetch.connect_timeout_secs, 10);
        assert_eq!(config.user_agent.crawler_name, "TestWalker");
        assert_eq!(config.disallow.len(), 2);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.walk.max_hops, 1000);
        assert_eq!(config.walk.target, "Philosophy");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/walk.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[walk]
max-hops = 0
"#;
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_empty_start_list_rejected() {
        let result = parse_config(
            r#"
[walk]
start = []
"#,
        );
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_invalid_disallow_entry() {
        let result = parse_config(
            r#"
[[disallow]]
prefix = "A"
suffix = "B"
"#,
        );
        assert!(matches!(result, Err(ConfigError::InvalidRule(_))));
    }
}
