//! Philosophy Walk: does every first link lead to Philosophy?
//!
//! This crate follows the first eligible link of Wikipedia articles, starting
//! from a given page, until it reaches the Philosophy article, runs into a
//! cycle, finds a page without an eligible link, or exhausts its hop budget.

pub mod config;
pub mod content;
pub mod select;
pub mod title;
pub mod walker;

use thiserror::Error;

/// Main error type for Philosophy Walk operations
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid page title: {0}")]
    Title(#[from] TitleError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Walk(#[from] walker::WalkFailure),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid disallow rule: {0}")]
    InvalidRule(String),
}

/// Page title errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleError {
    #[error("Page title is empty")]
    Empty,

    #[error("Not an article reference: {0}")]
    NotAnArticle(String),
}

/// Errors raised while fetching a page
///
/// The walker never retries these; retrying is the fetcher's concern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Page not found: {page}")]
    NotFound { page: String },

    #[error("Rate limited while fetching {page}")]
    RateLimited { page: String },

    #[error("HTTP {status} for {page}")]
    Status { page: String, status: u16 },

    #[error("Request timeout for {page}")]
    Timeout { page: String },

    #[error("Network error for {page}: {message}")]
    Network { page: String, message: String },

    #[error("Expected HTML for {page}, got '{content_type}'")]
    NotHtml { page: String, content_type: String },

    #[error("Cannot build a request for {page}: {message}")]
    InvalidTitle { page: String, message: String },
}

/// Result type alias for Philosophy Walk operations
pub type Result<T> = std::result::Result<T, WalkError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for title operations
pub type TitleResult<T> = std::result::Result<T, TitleError>;

// Re-export commonly used types
pub use config::Config;
pub use content::{ContentNode, Markup, PageContent, StyleFlags};
pub use select::{LinkSelector, Selection};
pub use title::{DisallowedTargets, PageId, TargetRule};
pub use walker::{Outcome, Trail, WalkFailure, Walker};
