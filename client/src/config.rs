use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the newsfeed backend
    pub api_url: String,
    /// Raw `Cookie` header value identifying the session, e.g. `session=...`
    pub session_cookie: Option<String>,
    pub poll_interval: Duration,
    /// How long a notification stays visible
    pub notification_lifetime: Duration,
    pub http_timeout: Duration,
    /// Where the HTML snapshot of the page is written
    pub output_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_url: env::var("NEWSFEED_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            session_cookie: env::var("NEWSFEED_SESSION")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            poll_interval: Duration::from_secs(parse_or("NEWSFEED_POLL_SECS", 30)),
            notification_lifetime: Duration::from_millis(parse_or("NEWSFEED_NOTIFY_MS", 3000)),
            http_timeout: Duration::from_secs(parse_or("NEWSFEED_HTTP_TIMEOUT_SECS", 10)),
            output_path: env::var("NEWSFEED_OUTPUT")
                .unwrap_or_else(|_| "newsfeed.html".to_string()),
        }
    }
}

/// Read a positive number, falling back to `default` when unset, zero or invalid
fn parse_or(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => parse_positive(&raw).unwrap_or_else(|| {
            tracing::warn!(key, value = %raw, default, "Expected a positive number, using default");
            default
        }),
        Err(_) => default,
    }
}

fn parse_positive(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|n| *n > 0)
}
