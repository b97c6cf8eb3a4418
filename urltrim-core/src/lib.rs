//! urltrim core library.
//!
//! Shortens HTTP(S) URLs to a display length by keeping the scheme and host
//! and cutting the path, either one URL at a time or across a whole log line.

pub mod config;
pub mod shortener;
pub mod text;

pub use config::{Config, ConfigError, FileLogConfig, LoggingConfig, Rotation};
pub use shortener::{DEFAULT_MAX_LENGTH, ELLIPSIS, UrlShortener, apply_to_message, shorten};
