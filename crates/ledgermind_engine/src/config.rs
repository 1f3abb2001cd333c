use std::time::Duration;

use ledgermind_logging::ledger_warn;
use url::Url;

use crate::{AskError, FailureKind};

/// Environment variable holding the answering service base URL.
pub const BASE_URL_VAR: &str = "LEDGERMIND_API_BASE_URL";
/// Environment variable overriding the HTTP request timeout, in seconds.
pub const REQUEST_TIMEOUT_VAR: &str = "LEDGERMIND_REQUEST_TIMEOUT_SECS";

/// Slack between the HTTP timeout and the outer answer deadline.
const DEADLINE_SLACK: Duration = Duration::from_secs(15);

/// Where the answering service lives. A missing base URL is not an error
/// until a question is actually asked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self { base_url }
    }

    /// Resolves `<base>/chat`, tolerating a trailing slash on the base.
    pub fn chat_endpoint(&self) -> Result<Url, AskError> {
        let base = self.base_url.as_deref().ok_or_else(|| {
            AskError::new(
                FailureKind::MissingBaseUrl,
                format!("{BASE_URL_VAR} is not set"),
            )
        })?;

        let mut url = Url::parse(base)
            .map_err(|err| AskError::new(FailureKind::InvalidBaseUrl, err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AskError::new(
                FailureKind::InvalidBaseUrl,
                format!("unsupported scheme {}", url.scheme()),
            ));
        }

        url.path_segments_mut()
            .map_err(|_| AskError::new(FailureKind::InvalidBaseUrl, "base url cannot carry a path"))?
            .pop_if_empty()
            .push("chat");
        Ok(url)
    }
}

#[derive(Debug, Clone)]
pub struct AskSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Upper bound on the whole ask, after which the request resolves as a timeout.
    pub answer_deadline: Duration,
    pub max_bytes: u64,
}

impl Default for AskSettings {
    fn default() -> Self {
        let request_timeout = Duration::from_secs(30);
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout,
            answer_deadline: request_timeout + DEADLINE_SLACK,
            max_bytes: 1024 * 1024,
        }
    }
}

impl AskSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let Some(raw) = lookup(REQUEST_TIMEOUT_VAR) else {
            return settings;
        };

        match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => {
                settings.request_timeout = Duration::from_secs(secs);
                settings.answer_deadline = settings.request_timeout + DEADLINE_SLACK;
            }
            _ => {
                ledger_warn!(
                    "Ignoring {}={:?}; expected a positive number of seconds",
                    REQUEST_TIMEOUT_VAR,
                    raw
                );
            }
        }
        settings
    }
}
