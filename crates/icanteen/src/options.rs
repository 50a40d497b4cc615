// ABOUTME: Configuration for the Extractor: Options and the fluent ExtractorBuilder.
// ABOUTME: Options are immutable once built and turned into FetchOptions for every request.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::extractor::Extractor;
use crate::resource::{FetchOptions, Fetcher, HttpFetcher};

/// Configuration options for the Extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// User-Agent sent to the canteen server. No header is sent when `None`.
    pub user_agent: Option<String>,
    /// Connect and read timeout in milliseconds. Zero or negative keeps the transport default.
    pub timeout_ms: i64,
}

impl Options {
    /// The effective timeout, `None` when the transport default applies.
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_ms > 0 {
            Some(Duration::from_millis(self.timeout_ms as u64))
        } else {
            None
        }
    }

    pub(crate) fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            user_agent: self.user_agent.clone(),
            timeout: self.timeout(),
        }
    }
}

/// Builder for constructing Extractor instances with custom configuration.
#[derive(Clone)]
pub struct ExtractorBuilder {
    opts: Options,
    fetcher: Option<Arc<dyn Fetcher>>,
}

impl ExtractorBuilder {
    /// Create a new ExtractorBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
            fetcher: None,
        }
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = Some(user_agent.into());
        self
    }

    /// Set the connect and read timeout in milliseconds.
    pub fn timeout_ms(mut self, timeout_ms: i64) -> Self {
        self.opts.timeout_ms = timeout_ms;
        self
    }

    /// Use a custom page fetcher instead of the HTTP one.
    pub fn fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Build the Extractor with the configured options.
    pub fn build(self) -> Extractor {
        let fetcher = self.fetcher.unwrap_or_else(|| Arc::new(HttpFetcher));
        Extractor::new(self.opts, fetcher)
    }
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExtractorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorBuilder")
            .field("opts", &self.opts)
            .field("custom_fetcher", &self.fetcher.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_user_agent_or_timeout() {
        let opts = Options::default();
        assert_eq!(opts.user_agent, None);
        assert_eq!(opts.timeout(), None);
    }

    #[test]
    fn non_positive_timeout_means_transport_default() {
        for ms in [0, -1, -2000] {
            let opts = Options {
                timeout_ms: ms,
                ..Default::default()
            };
            assert_eq!(opts.fetch_options().timeout, None);
        }
    }

    #[test]
    fn positive_timeout_is_applied() {
        let opts = Options {
            user_agent: Some("ua".into()),
            timeout_ms: 2000,
        };
        assert_eq!(
            opts.fetch_options(),
            FetchOptions {
                user_agent: Some("ua".into()),
                timeout: Some(Duration::from_millis(2000)),
            }
        );
    }

    #[test]
    fn builder_sets_options() {
        let extractor = ExtractorBuilder::new()
            .user_agent("icanteen-test")
            .timeout_ms(1500)
            .build();
        assert_eq!(extractor.options().user_agent.as_deref(), Some("icanteen-test"));
        assert_eq!(extractor.options().timeout_ms, 1500);
    }
}
