use anyhow::{anyhow, Context, Result};
use chrono::{Local, TimeZone};
use dotenvy::dotenv;
use std::env;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

/// The Pipe trait provides a method to pipe a value through a transformation.
///
/// This trait allows for a more functional programming style by enabling
/// method chaining and easy value transformation.
pub trait Pipe {
    /// Transforms the current value by applying the given function.
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
        Self: Sized;
}

impl<T> Pipe for T {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
        Self: Sized,
    {
        f(self)
    }
}

// A static variable to ensure that environment variables are loaded only once.
static LOAD_ENV: OnceLock<()> = OnceLock::new();

/// Loads environment variables from `.env` and environment-specific files.
///
/// Order of precedence:
/// 1. the default `.env` file
/// 2. `.env.dev` (debug builds) or `.env.prod` (release builds)
/// 3. a local override file `.env.local`, if it exists
pub fn load_dotenv() {
    LOAD_ENV.get_or_init(|| {
        dotenv().ok();

        let debug = cfg!(debug_assertions);
        let env_file = if debug { ".env.dev" } else { ".env.prod" };

        if Path::new(env_file).exists() {
            dotenvy::from_filename(env_file).ok();
        }

        if Path::new(".env.local").exists() {
            dotenvy::from_filename(".env.local").ok();
        }
    });
}

/// Retrieves a value from an environment variable and parses it into type `T`.
/// If the variable is not set, returns `default`. If parsing fails, returns an error.
pub fn get_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Debug,
{
    match env::var(key) {
        Ok(val) => val
            .parse()
            .map_err(|_| anyhow!(format!("Failed to parse {} env var", key))),
        Err(_) => Ok(default),
    }
}

/// Retrieves a vector from an environment variable by splitting on commas.
/// If the variable is not set, returns `default`. If parsing fails, returns an error.
pub fn get_vec_from_env_or<T>(key: &str, default: Vec<T>) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: Into<anyhow::Error>,
{
    match env::var(key) {
        Ok(val) => val
            .split(',')
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(Into::into)
                    .context(format!("Failed to parse {} env var", key))
            })
            .collect(),
        Err(_) => Ok(default),
    }
}

/// Retrieves a `u64` from an environment variable.
/// Supporting K, M, G suffixes (case-insensitive).
/// If the variable is not set, returns `default`. If parsing fails, returns an error.
pub fn get_size_from_env_or(key: &str, default: u64) -> Result<u64> {
    match env::var(key) {
        Ok(val) => parse_size(&val).ok_or(anyhow!(format!("Failed to parse {} env var", key))),
        Err(_) => Ok(default),
    }
}

/// Converts a size string to a number, supporting K, M, G suffixes (case-insensitive).
pub fn parse_size(size_str: &str) -> Option<u64> {
    if size_str.is_empty() {
        return None;
    }

    let size_str = size_str.to_lowercase();

    let (num_part, unit_multiplier) = match size_str.chars().last() {
        Some('k') => (&size_str[..size_str.len() - 1], 1024u64),
        Some('m') => (&size_str[..size_str.len() - 1], 1024u64 * 1024),
        Some('g') => (&size_str[..size_str.len() - 1], 1024u64 * 1024 * 1024),
        _ => (size_str.as_str(), 1),
    };

    match num_part.parse::<u64>() {
        Ok(num) => Some(num * unit_multiplier),
        Err(_) => None,
    }
}

/// Escapes the five HTML-significant characters so user-submitted text can be
/// embedded in a markup fragment.
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Formats a UTC epoch-milliseconds timestamp as a local "yyyy-MM-dd HH:mm:ss" string.
pub fn format_timestamp(millis: i64) -> String {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size(""), None);
        assert_eq!(parse_size("1"), Some(1));
        assert_eq!(parse_size("100"), Some(100));
        assert_eq!(parse_size("3k"), Some(3 * 1024));
        assert_eq!(parse_size("100M"), Some(100 * 1024 * 1024));
        assert_eq!(parse_size("5g"), Some(5 * 1024 * 1024 * 1024));
        assert_eq!(parse_size("5 g"), None);
        assert_eq!(parse_size("abc"), None);
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("plain text"), "plain text");
        assert_eq!(
            html_escape(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
        assert_eq!(html_escape(""), "");
    }

    #[test]
    fn test_format_timestamp() {
        let formatted = format_timestamp(1_700_000_000_000);
        assert_eq!(formatted.len(), 19);
        assert!(formatted.contains(' '));
    }
}
