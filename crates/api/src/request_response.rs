// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response shapes shared by every gateway.

use crate::error::{ApiError, GENERIC_FAILURE_MESSAGE};
use serde::{Deserialize, Serialize};

/// Sort field used when a view does not pick one.
pub const DEFAULT_SORT_FIELD: &str = "Id";

/// Page size used by list views unless the user changes it.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Sort direction of a paged query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first.
    #[serde(rename = "ascend")]
    Ascending,
    /// Largest first.
    #[default]
    #[serde(rename = "descend")]
    Descending,
}

/// Body of every paged list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageRequest {
    /// Records per page, at least 1.
    pub page_size: u32,
    /// 1-based page number.
    pub page_number: u32,
    /// Field the service sorts by.
    pub sort_field: String,
    /// Sort direction.
    #[serde(rename = "SortOrder")]
    pub sort_direction: SortDirection,
    /// Whether expired tenders are included; omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_expired: Option<bool>,
}

impl PageRequest {
    /// Creates a request for `page_number` with `page_size` records, sorted
    /// by [`DEFAULT_SORT_FIELD`] descending.
    ///
    /// Both numbers are raised to 1 when given as 0.
    #[must_use]
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            page_number: page_number.max(1),
            sort_field: DEFAULT_SORT_FIELD.to_string(),
            sort_direction: SortDirection::default(),
            include_expired: None,
        }
    }

    /// Sets the sort field and direction.
    #[must_use]
    pub fn sorted_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = field.into();
        self.sort_direction = direction;
        self
    }

    /// Sets the include-expired filter.
    #[must_use]
    pub const fn with_include_expired(mut self, include_expired: bool) -> Self {
        self.include_expired = Some(include_expired);
        self
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of an ordered record set.
///
/// `records` never holds more than `page_size` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageResult<T> {
    /// 1-based page number.
    pub page_number: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Number of pages in the whole record set.
    pub pages_count: u32,
    /// Number of records in the whole record set.
    pub records_count: u64,
    /// The records of this page, in server order.
    pub records: Vec<T>,
}

impl<T> PageResult<T> {
    /// Returns the number of pages needed for `records_count` records.
    #[must_use]
    pub fn pages_for(records_count: u64, page_size: u32) -> u32 {
        if page_size == 0 {
            return 0;
        }
        u32::try_from(records_count.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
    }

    /// Returns an empty page matching `request`.
    #[must_use]
    pub const fn empty(request: &PageRequest) -> Self {
        Self {
            page_number: request.page_number,
            page_size: request.page_size,
            pages_count: 0,
            records_count: 0,
            records: Vec::new(),
        }
    }

    /// Converts every record with `f`.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            page_number: self.page_number,
            page_size: self.page_size,
            pages_count: self.pages_count,
            records_count: self.records_count,
            records: self.records.into_iter().map(f).collect(),
        }
    }
}

impl<T: Clone> PageResult<T> {
    /// Cuts the page `request` asks for out of the full ordered record set.
    ///
    /// Pages past the end are empty; no page number panics.
    #[must_use]
    pub fn paginate(all: &[T], request: &PageRequest) -> Self {
        let page_size: u32 = request.page_size.max(1);
        let page_number: u32 = request.page_number.max(1);
        let start: usize = usize::try_from(u64::from(page_number - 1) * u64::from(page_size))
            .unwrap_or(usize::MAX);
        let records_count: u64 = u64::try_from(all.len()).unwrap_or(u64::MAX);

        Self {
            page_number,
            page_size,
            pages_count: Self::pages_for(records_count, page_size),
            records_count,
            records: all
                .iter()
                .skip(start)
                .take(usize::try_from(page_size).unwrap_or(usize::MAX))
                .cloned()
                .collect(),
        }
    }
}

/// Envelope every remote operation answers with.
///
/// Success is decided by `is_success` alone. `result` may be absent even on
/// success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiResponse<T> {
    /// Whether the service performed the operation.
    pub is_success: bool,
    /// Human-readable outcome, shown verbatim on failure.
    pub message: String,
    /// Status code reported by the service.
    pub status_code: u16,
    /// The payload, if any.
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful response carrying `result`.
    #[must_use]
    pub fn success(result: T) -> Self {
        Self {
            is_success: true,
            message: String::new(),
            status_code: 200,
            result: Some(result),
        }
    }

    /// Creates a failed response.
    #[must_use]
    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            message: message.into(),
            status_code,
            result: None,
        }
    }

    /// Returns the message a view shows for a failed response.
    #[must_use]
    pub fn failure_message(&self) -> String {
        if self.message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            self.message.clone()
        }
    }

    /// Returns the payload of a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the service's message when
    /// `is_success` is false.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.is_success {
            Ok(self.result)
        } else {
            Err(ApiError::Rejected {
                status_code: self.status_code,
                message: self.message,
            })
        }
    }

    /// Converts the payload with `f`, keeping the envelope.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            is_success: self.is_success,
            message: self.message,
            status_code: self.status_code,
            result: self.result.map(f),
        }
    }
}

/// Body of the authenticate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Body of every remove request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoveRequest {
    /// Identifier of the record to remove.
    pub id: i64,
}
