// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tenderboard_api::{ApiError, AuthError};
use thiserror::Error;

/// Errors the console reports before exiting.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Invalid date '{value}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate { value: String },
    #[error("Invalid price '{value}'")]
    InvalidPrice { value: String },
    #[error("{0}")]
    Failed(String),
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),
}

impl From<AuthError> for ConsoleError {
    fn from(e: AuthError) -> Self {
        Self::Api(ApiError::Auth(e))
    }
}
