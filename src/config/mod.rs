//! Configuration module for Index-Ripple
//!
//! The crawl has two knobs: the size of the worker pool and whether directory
//! links are reported. Both can come from an optional TOML file and are
//! overridden by command-line flags.
//!
//! # Example
//!
//! ```no_run
//! use index_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("ripple.toml")).unwrap();
//! println!("Crawler will use {} workers", config.concurrency);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::{load_config, parse_config};
pub use types::{CrawlConfig, DEFAULT_CONCURRENCY};
pub use validation::validate;
