//! Configuration module for Philosophy Walk
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every section is optional; a missing file means defaults.
//!
//! # Example
//!
//! ```no_run
//! use philosophy_walk::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("walk.toml")).unwrap();
//! println!("Walking at most {} hops", config.walk.max_hops);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, DisallowEntry, FetchConfig, UserAgentConfig, WalkConfig, WikiConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
