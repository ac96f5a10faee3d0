//! Application configuration loaded from environment variables.
//!
//! - `RIBBON_API_URL` overrides the market-data endpoint.
//! - `RIBBON_DEMO` (`1`/`true`/`yes`) swaps the HTTP feed for the in-process
//!   synthetic generator.
//! - `RIBBON_LOG_FILE` sets where tracing output is written.
//! - `RIBBON_TICK_MS` sets the UI tick interval in milliseconds.

/// Default market-data endpoint served by the local backend.
const DEFAULT_API_URL: &str = "http://localhost:8000/api/market-data";

/// Default log file, relative to the working directory.
const DEFAULT_LOG_FILE: &str = "ribbon.log";

/// Default UI tick interval.
const DEFAULT_TICK_MS: u64 = 250;

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub log_file: String,
    pub tick_ms: u64,
}

/// Where market data comes from.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub api_url: String,
    /// Use the synthetic generator instead of HTTP.
    pub demo: bool,
}

/// Loads the application configuration from environment variables.
///
/// Every variable is optional. Empty values are treated as unset.
///
/// # Errors
///
/// Returns [`RibbonError::Config`](crate::RibbonError::Config) if
/// `RIBBON_DEMO` is not a recognised boolean or `RIBBON_TICK_MS` is not a
/// positive integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let api_url = non_empty_var("RIBBON_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let demo = match non_empty_var("RIBBON_DEMO") {
        Some(value) => parse_flag(&value).ok_or_else(|| {
            crate::RibbonError::Config(format!("RIBBON_DEMO has invalid value {value:?}"))
        })?,
        None => false,
    };

    let log_file = non_empty_var("RIBBON_LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    let tick_ms = match non_empty_var("RIBBON_TICK_MS") {
        Some(value) => value
            .parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or_else(|| {
                crate::RibbonError::Config(format!(
                    "RIBBON_TICK_MS must be a positive integer, got {value:?}"
                ))
            })?,
        None => DEFAULT_TICK_MS,
    };

    Ok(AppConfig {
        feed: FeedConfig { api_url, demo },
        log_file,
        tick_ms,
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
