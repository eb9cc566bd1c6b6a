// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resolved client settings.

use crate::error::ConsoleError;
use reqwest::Url;
use std::time::Duration;

/// Base URL of the remote service when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://localhost:7221/api";

/// Request timeout when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything the HTTP gateway needs to reach the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root without a trailing slash.
    pub base_url: String,
    /// Bearer token, when already logged in.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidBaseUrl`] unless `base_url` is an
    /// absolute `http` or `https` URL.
    pub fn new(base_url: &str) -> Result<Self, ConsoleError> {
        let trimmed: &str = base_url.trim().trim_end_matches('/');
        let parsed: Url = Url::parse(trimmed).map_err(|e| ConsoleError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConsoleError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Sets the bearer token. Blank tokens are ignored.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the absolute URL of `path`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
