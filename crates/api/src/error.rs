// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::session::Role;
use tenderboard_domain::DomainError;
use thiserror::Error;

/// Text shown to the user when a request failed for reasons the user cannot
/// act on (network, decoding).
pub const GENERIC_FAILURE_MESSAGE: &str = "The request could not be completed. Please try again.";

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No session token is present.
    #[error("Not logged in")]
    NotLoggedIn,
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: Role,
    },
}

/// API-level errors.
///
/// A business failure (`IsSuccess == false`) is not an error at the gateway
/// level; it becomes [`ApiError::Rejected`] only where a workflow needs a
/// successful outcome to continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Client-side validation failed; no request was sent.
    #[error("Validation failed: {0}")]
    Validation(#[from] DomainError),
    /// Invalid input outside the domain rules, such as empty credentials.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The request never produced a response.
    #[error("Request failed: {message}")]
    Transport {
        /// A description of the transport failure.
        message: String,
    },
    /// The remote service answered with `IsSuccess == false`.
    #[error("{message}")]
    Rejected {
        /// The status code the service reported.
        status_code: u16,
        /// The service's message, verbatim.
        message: String,
    },
    /// The response body could not be understood.
    #[error("Failed to decode response: {message}")]
    Decode {
        /// A description of the decoding failure.
        message: String,
    },
    /// The session does not allow the action.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// Returns the text a view surfaces for this error.
    ///
    /// Transport and decoding failures map to a generic notice. Rejections
    /// carry the service's message verbatim.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { .. } | Self::Decode { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
            Self::Rejected { message, .. } if message.trim().is_empty() => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            Self::Rejected { message, .. } => message.clone(),
            Self::Validation(e) => e.to_string(),
            Self::InvalidInput { message, .. } => message.clone(),
            Self::Auth(e) => e.to_string(),
        }
    }
}
