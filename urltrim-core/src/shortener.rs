//! Display-length shortening of HTTP(S) URLs.
//!
//! A URL longer than `max_length` keeps its scheme and host intact and loses
//! the tail of its path, which is replaced by [`ELLIPSIS`]. Anything that is
//! not an `http://` or `https://` URL is passed through untouched, so these
//! functions are safe to run over arbitrary log text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::Config;
use crate::text::{char_len, take_chars};


/// Default maximum displayed URL length.
pub const DEFAULT_MAX_LENGTH: usize = 50;

/// Marker appended to every shortened URL.
pub const ELLIPSIS: &str = "...";

/// Scheme plus host, up to (not including) the first `/`.
static DOMAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^/]+").expect("domain pattern is valid"));

/// A URL embedded in free text: scheme followed by everything up to whitespace.
static URL_IN_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("url pattern is valid"));

/// Shorten `url` so it displays in at most `max_length` characters.
///
/// - `url` no longer than `max_length`: returned unchanged.
/// - Longer HTTP(S) URL: `domain + path prefix + "..."`, where the path prefix
///   holds `max_length - len(domain) - 3` characters. The domain is never cut;
///   if it alone does not fit, the path prefix is empty and the result exceeds
///   `max_length`.
/// - Longer non-HTTP(S) string: returned unchanged.
pub fn shorten(url: &str, max_length: usize) -> String {
    if char_len(url) <= max_length {
        return url.to_string();
    }

    let Some(domain) = DOMAIN_RE.find(url) else {
        tracing::debug!(max_length, "Not an HTTP(S) URL, leaving as is");
        return url.to_string();
    };

    let (domain, path) = url.split_at(domain.end());
    let budget = max_length.saturating_sub(char_len(domain) + ELLIPSIS.len());
    let kept = take_chars(path, budget);

    tracing::debug!(
        max_length,
        domain,
        dropped = char_len(path) - char_len(kept),
        "Shortened URL"
    );

    format!("{domain}{kept}{ELLIPSIS}")
}

/// Shorten every HTTP(S) URL found in `text`, copying the rest verbatim.
pub fn apply_to_message(text: &str, max_length: usize) -> String {
    URL_IN_TEXT_RE
        .replace_all(text, |caps: &Captures<'_>| shorten(&caps[0], max_length))
        .into_owned()
}

/// Shortener bound to a fixed maximum length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlShortener {
    max_length: usize,
}

impl UrlShortener {
    /// Create a shortener that limits URLs to `max_length` characters.
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Create a shortener using `max_length` from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_length)
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// See [`shorten`].
    pub fn shorten(&self, url: &str) -> String {
        shorten(url, self.max_length)
    }

    /// See [`apply_to_message`].
    pub fn apply_to_message(&self, text: &str) -> String {
        apply_to_message(text, self.max_length)
    }
}

impl Default for UrlShortener {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH)
    }
}
