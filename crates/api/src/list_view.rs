// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-view state machine for paged lists.
//!
//! A list view moves `Idle -> Loading -> Loaded | Failed` and re-enters
//! `Loading` whenever its parameters change or an external refresh is
//! requested. Each change issues a numbered request; only the outcome of the
//! most recently issued request is applied, so a slow response for an old
//! page can never overwrite a newer one.

use crate::gateway::GatewayResult;
use crate::request_response::{
    DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD, PageRequest, PageResult, SortDirection,
};
use tracing::debug;

/// Query parameters a list view controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// 1-based page number.
    pub page_number: u32,
    /// Records per page.
    pub page_size: u32,
    /// Field to sort by.
    pub sort_field: String,
    /// Sort direction.
    pub sort_direction: SortDirection,
    /// Include-expired filter, when the view offers one.
    pub include_expired: Option<bool>,
}

impl ListParams {
    /// Builds the request body for these parameters.
    #[must_use]
    pub fn to_request(&self) -> PageRequest {
        let request: PageRequest = PageRequest::new(self.page_number, self.page_size)
            .sorted_by(self.sort_field.clone(), self.sort_direction);
        match self.include_expired {
            Some(include_expired) => request.with_include_expired(include_expired),
            None => request,
        }
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort_field: DEFAULT_SORT_FIELD.to_string(),
            sort_direction: SortDirection::default(),
            include_expired: None,
        }
    }
}

/// What a list view currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight; the previous records stay visible.
    Loading {
        /// Records of the previous successful load.
        records: Vec<T>,
        /// Total of the previous successful load.
        total: u64,
    },
    /// The latest request succeeded.
    Loaded {
        /// Records in server order.
        records: Vec<T>,
        /// Records in the whole result set.
        total: u64,
    },
    /// The latest request failed; no records are shown.
    Failed {
        /// The message to surface.
        message: String,
    },
}

/// A request the caller has to send and report back with
/// [`ListView::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    /// Identifies this request among those the view issued.
    pub ticket: u64,
    /// The body to send.
    pub request: PageRequest,
}

/// Whether a completed request changed the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome was applied.
    Applied,
    /// A newer request had been issued; the outcome was discarded.
    Stale,
}

/// State of one paged list.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    params: ListParams,
    state: ListState<T>,
    last_ticket: u64,
    seen_version: u64,
}

impl<T: Clone> ListView<T> {
    /// Creates an idle view with `params`.
    #[must_use]
    pub const fn new(params: ListParams) -> Self {
        Self {
            params,
            state: ListState::Idle,
            last_ticket: 0,
            seen_version: 0,
        }
    }

    #[must_use]
    pub const fn params(&self) -> &ListParams {
        &self.params
    }

    #[must_use]
    pub const fn state(&self) -> &ListState<T> {
        &self.state
    }

    /// Returns the visible records.
    #[must_use]
    pub fn records(&self) -> &[T] {
        match &self.state {
            ListState::Loading { records, .. } | ListState::Loaded { records, .. } => records,
            ListState::Idle | ListState::Failed { .. } => &[],
        }
    }

    /// Returns the total the pager shows.
    #[must_use]
    pub const fn total(&self) -> u64 {
        match &self.state {
            ListState::Loading { total, .. } | ListState::Loaded { total, .. } => *total,
            ListState::Idle | ListState::Failed { .. } => 0,
        }
    }

    /// Returns the failure message, if the latest request failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ListState::Failed { message } => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, ListState::Loading { .. })
    }

    /// Reloads the current page.
    pub fn refresh(&mut self) -> PendingRequest {
        self.issue()
    }

    /// Moves to `page_number`.
    pub fn go_to_page(&mut self, page_number: u32) -> PendingRequest {
        self.params.page_number = page_number.max(1);
        self.issue()
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: u32) -> PendingRequest {
        self.params.page_size = page_size.max(1);
        self.params.page_number = 1;
        self.issue()
    }

    /// Changes the sort order.
    pub fn sort_by(
        &mut self,
        field: impl Into<String>,
        direction: SortDirection,
    ) -> PendingRequest {
        self.params.sort_field = field.into();
        self.params.sort_direction = direction;
        self.issue()
    }

    /// Changes the include-expired filter and returns to the first page.
    pub fn set_include_expired(&mut self, include_expired: bool) -> PendingRequest {
        self.params.include_expired = Some(include_expired);
        self.params.page_number = 1;
        self.issue()
    }

    /// Reacts to the hub's creation counter.
    ///
    /// Issues a refresh for every version of 1 or above that this view has
    /// not seen yet. Version 0 and repeats are ignored.
    pub fn observe_version(&mut self, version: u64) -> Option<PendingRequest> {
        if version == 0 || version <= self.seen_version {
            return None;
        }
        self.seen_version = version;
        debug!(version, "Refreshing list after tender creation");
        Some(self.issue())
    }

    /// Applies the outcome of the request identified by `ticket`.
    ///
    /// Outcomes of any request but the most recently issued one are
    /// discarded. A rejected response shows the service's message and no
    /// records. A transport failure shows a generic notice.
    pub fn complete(&mut self, ticket: u64, outcome: GatewayResult<PageResult<T>>) -> Completion {
        if ticket != self.last_ticket {
            debug!(
                ticket,
                latest = self.last_ticket,
                "Discarding stale list response"
            );
            return Completion::Stale;
        }

        self.state = match outcome {
            Ok(response) if response.is_success => match response.result {
                Some(page) => ListState::Loaded {
                    total: page.records_count,
                    records: page.records,
                },
                None => ListState::Loaded {
                    records: Vec::new(),
                    total: 0,
                },
            },
            Ok(response) => ListState::Failed {
                message: response.failure_message(),
            },
            Err(e) => {
                debug!(?e, "List request failed");
                ListState::Failed {
                    message: e.user_message(),
                }
            }
        };
        Completion::Applied
    }

    /// Reloads the current page with `fetch` and applies the outcome.
    pub async fn load<F, Fut>(&mut self, fetch: F) -> Completion
    where
        T: Send,
        F: FnOnce(PageRequest) -> Fut + Send,
        Fut: Future<Output = GatewayResult<PageResult<T>>> + Send,
    {
        let pending: PendingRequest = self.refresh();
        let outcome: GatewayResult<PageResult<T>> = fetch(pending.request).await;
        self.complete(pending.ticket, outcome)
    }

    fn issue(&mut self) -> PendingRequest {
        self.last_ticket += 1;
        let previous: ListState<T> = std::mem::replace(&mut self.state, ListState::Idle);
        let (records, total): (Vec<T>, u64) = match previous {
            ListState::Loading { records, total } | ListState::Loaded { records, total } => {
                (records, total)
            }
            ListState::Idle | ListState::Failed { .. } => (Vec::new(), 0),
        };
        self.state = ListState::Loading { records, total };

        PendingRequest {
            ticket: self.last_ticket,
            request: self.params.to_request(),
        }
    }
}

impl<T: Clone> Default for ListView<T> {
    fn default() -> Self {
        Self::new(ListParams::default())
    }
}
