// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod gateway;
mod list_view;
mod report_view;
mod request_response;
mod session;
pub mod wire;
pub mod workflows;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use error::{ApiError, AuthError, GENERIC_FAILURE_MESSAGE};
pub use gateway::{AdminGateway, AuthGateway, ContractorGateway, GatewayResult};
pub use list_view::{Completion, ListParams, ListState, ListView, PendingRequest};
pub use report_view::{PendingReport, REPORT_TENDER_PAGE_SIZE, ReportState, ReportView};
pub use request_response::{
    ApiResponse, DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD, LoginRequest, PageRequest, PageResult,
    RemoveRequest, SortDirection,
};
pub use session::{
    ADMIN_AREA_PREFIX, CONTRACTOR_AREA_PREFIX, Role, UserSession, required_role_for_path,
};
