use crate::title::{DisallowedTargets, PageId, TargetRule, PHILOSOPHY};
use crate::{ConfigError, ConfigResult, TitleResult};
use serde::Deserialize;
use url::Url;

/// Main configuration structure for Philosophy Walk
///
/// Every section is optional in the TOML file and falls back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub walk: WalkConfig,
    pub wiki: WikiConfig,
    pub fetch: FetchConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub disallow: Vec<DisallowEntry>,
}

/// Walk behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Pages to start walking from
    pub start: Vec<String>,

    /// Page that ends a walk successfully
    pub target: String,

    /// Maximum number of hops per walk
    #[serde(rename = "max-hops")]
    pub max_hops: u32,

    /// Lower bound of the pause between hops (milliseconds)
    #[serde(rename = "min-delay-ms")]
    pub min_delay_ms: u64,

    /// Upper bound of the pause between hops (milliseconds)
    #[serde(rename = "max-delay-ms")]
    pub max_delay_ms: u64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            start: vec!["Sport".to_string()],
            target: PHILOSOPHY.to_string(),
            max_hops: 1000,
            min_delay_ms: 1000,
            max_delay_ms: 2000,
        }
    }
}

/// Which wiki to walk
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    /// Scheme and host articles are served from
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org".to_string(),
        }
    }
}

/// HTTP fetch behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Retries after a timeout or 5xx response
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Pause between retries (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_retries: 3,
            retry_delay_ms: 5000,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "PhilosophyWalk".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/philosophy-walk/philosophy-walk".to_string(),
            contact_email: "philosophy-walk@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// An extra disallowed-target pattern; exactly one field must be set
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DisallowEntry {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub contains: Option<String>,
    pub exact: Option<String>,
}

impl DisallowEntry {
    /// Converts the entry into a rule
    ///
    /// # Returns
    ///
    /// * `Ok(TargetRule)` - The entry sets exactly one non-empty pattern
    /// * `Err(ConfigError::InvalidRule)` - Zero, several or empty patterns
    pub fn to_rule(&self) -> ConfigResult<TargetRule> {
        let set: Vec<(&str, &String)> = [
            ("prefix", &self.prefix),
            ("suffix", &self.suffix),
            ("contains", &self.contains),
            ("exact", &self.exact),
        ]
        .into_iter()
        .filter_map(|(kind, value)| value.as_ref().map(|v| (kind, v)))
        .collect();

        let (kind, pattern) = match set.as_slice() {
            [single] => *single,
            [] => {
                return Err(ConfigError::InvalidRule(
                    "disallow entry must set one of prefix, suffix, contains or exact".to_string(),
                ))
            }
            _ => {
                return Err(ConfigError::InvalidRule(format!(
                    "disallow entry sets {} patterns, expected one",
                    set.len()
                )))
            }
        };

        if pattern.trim().is_empty() {
            return Err(ConfigError::InvalidRule(format!(
                "disallow {} pattern cannot be empty",
                kind
            )));
        }

        Ok(match kind {
            "prefix" => TargetRule::prefix(pattern),
            "suffix" => TargetRule::suffix(pattern),
            "contains" => TargetRule::contains(pattern),
            _ => TargetRule::exact(pattern),
        })
    }
}

impl Config {
    /// Wikipedia's default rules plus every configured `[[disallow]]` entry
    pub fn disallowed_targets(&self) -> ConfigResult<DisallowedTargets> {
        let mut targets = DisallowedTargets::wikipedia();
        for entry in &self.disallow {
            targets.insert(entry.to_rule()?);
        }
        Ok(targets)
    }

    pub fn target_page(&self) -> TitleResult<PageId> {
        PageId::parse(&self.walk.target)
    }

    pub fn start_pages(&self) -> TitleResult<Vec<PageId>> {
        self.walk.start.iter().map(|s| PageId::parse(s)).collect()
    }

    pub fn base_url(&self) -> ConfigResult<Url> {
        Url::parse(&self.wiki.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))
    }
}
