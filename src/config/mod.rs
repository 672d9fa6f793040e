//! Configuration module for Sitemap-Audit
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every section has defaults, so `Config::default()` is a
//! complete, valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use sitemap_audit::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("audit.toml")).unwrap();
//! println!("User agent: {}", config.user_agent.header_value());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_with_hash, parse_config};
