//! Client configuration options.

use std::time::Duration;

/// Largest refresh buffer accepted by [`ClientConfig::with_refresh_buffer`], one day.
pub const MAX_REFRESH_BUFFER_SECS: i64 = 24 * 60 * 60;

/// Configuration for the FIB client.
///
/// # Example
///
/// ```
/// use fib_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-shop/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Whether payment calls refresh an expiring token first
    pub auto_refresh_session: bool,
    /// Buffer time (in seconds) before expiry to refresh
    pub refresh_buffer_secs: i64,
    /// Base URL overriding the environment's, e.g. for a mock server
    pub base_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("fib-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            auto_refresh_session: false,
            refresh_buffer_secs: 0,
            base_url: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable or disable refreshing the token before each payment call.
    pub fn with_auto_refresh(mut self, enabled: bool) -> Self {
        self.auto_refresh_session = enabled;
        self
    }

    /// Set the buffer time before expiry to refresh.
    ///
    /// Clamped to `0..=MAX_REFRESH_BUFFER_SECS`.
    pub fn with_refresh_buffer(mut self, secs: i64) -> Self {
        self.refresh_buffer_secs = secs.clamp(0, MAX_REFRESH_BUFFER_SECS);
        self
    }

    /// Send all requests to `base_url` instead of the environment's URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}
