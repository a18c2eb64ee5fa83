use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const DEFAULT_MAX_RETRIES: u32 = 1;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1_000);

pub const ENV_BASE_URL: &str = "CUSTDESK_API_BASE_URL";
pub const ENV_TIMEOUT: &str = "CUSTDESK_API_TIMEOUT";
pub const ENV_RETRIES: &str = "CUSTDESK_API_RETRIES";

/// Connection settings for the REST backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Overall deadline for one attempt, connect through body.
    pub timeout: Duration,
    /// Extra attempts after a network or server failure.
    pub max_retries: u32,
    /// Delay before the first retry; doubles for every further attempt.
    pub retry_delay: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl ApiConfig {
    /// Reads the `CUSTDESK_API_*` variables; missing or invalid values keep
    /// their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_BASE_URL).map(|raw| raw.trim().to_string())
            && !url.is_empty()
        {
            config.base_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(millis) if millis > 0 => config.timeout = Duration::from_millis(millis),
                _ => tracing::warn!(value = %raw, "ignoring invalid {ENV_TIMEOUT}"),
            }
        }
        if let Some(raw) = lookup(ENV_RETRIES) {
            match raw.trim().parse::<u32>() {
                Ok(retries) => config.max_retries = retries,
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid {ENV_RETRIES}"),
            }
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Joins `path` onto the base url with exactly one slash between them.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
