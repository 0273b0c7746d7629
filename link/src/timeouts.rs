//! Timeout configuration for the HTTP transport.
//!
//! Both timeouts are disabled by default: a hung request hangs its operation
//! until the remote answers. Callers that want a bound opt in through a
//! preset or the builder.

use std::time::Duration;

/// Timeout configuration applied by [`ReqwestTransport`](crate::transport::ReqwestTransport).
///
/// A zero duration means "no timeout".
///
/// # Examples
///
/// ```rust
/// use airtable_link::LinkTimeouts;
/// use std::time::Duration;
///
/// // No timeouts at all
/// let timeouts = LinkTimeouts::default();
/// assert!(LinkTimeouts::is_no_timeout(timeouts.request_timeout));
///
/// let timeouts = LinkTimeouts::builder()
///     .connection_timeout(Duration::from_secs(5))
///     .request_timeout_secs(60)
///     .build();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTimeouts {
    /// Timeout for establishing connections (TCP + TLS handshake).
    /// Default: disabled
    pub connection_timeout: Duration,

    /// Timeout for a whole request, from send until the body is read.
    /// Default: disabled
    pub request_timeout: Duration,
}

impl LinkTimeouts {
    pub fn builder() -> LinkTimeoutsBuilder {
        LinkTimeoutsBuilder::new()
    }

    /// Short timeouts for local development against a mock server.
    pub fn fast() -> Self {
        Self {
            connection_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
        }
    }

    /// Generous timeouts for high-latency links.
    pub fn relaxed() -> Self {
        Self {
            connection_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(120),
        }
    }

    /// Check if a duration represents "no timeout" (zero or very large).
    pub fn is_no_timeout(duration: Duration) -> bool {
        duration.is_zero() || duration > Duration::from_secs(86400 * 365)
    }
}

/// Builder for [`LinkTimeouts`].
#[derive(Debug, Clone)]
pub struct LinkTimeoutsBuilder {
    timeouts: LinkTimeouts,
}

impl LinkTimeoutsBuilder {
    fn new() -> Self {
        Self {
            timeouts: LinkTimeouts::default(),
        }
    }

    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connection_timeout = timeout;
        self
    }

    pub fn connection_timeout_secs(self, secs: u64) -> Self {
        self.connection_timeout(Duration::from_secs(secs))
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.request_timeout = timeout;
        self
    }

    pub fn request_timeout_secs(self, secs: u64) -> Self {
        self.request_timeout(Duration::from_secs(secs))
    }

    pub fn build(self) -> LinkTimeouts {
        self.timeouts
    }
}
