// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tender report view: pick a tender, show its offers report.

use crate::gateway::{AdminGateway, GatewayResult};
use crate::list_view::Completion;
use crate::request_response::{DEFAULT_SORT_FIELD, PageRequest, PageResult, SortDirection};
use tenderboard_domain::{OfferParticipant, OffersReport, TenderOffer};
use tracing::debug;

/// Number of tenders offered for selection.
pub const REPORT_TENDER_PAGE_SIZE: u32 = 200;

const REPORT_FAILURE_MESSAGE: &str = "Failed to retrieve the report.";

/// What the report part of the view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportState {
    /// No tender selected or nothing requested yet.
    Idle,
    /// A report request is in flight.
    Loading,
    /// The selected tender's report.
    Loaded(OffersReport),
    /// The latest report request failed.
    Failed {
        /// The message to surface.
        message: String,
    },
}

/// A report request the caller has to send and report back with
/// [`ReportView::complete_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReport {
    /// Identifies this request among those the view issued.
    pub ticket: u64,
    /// The tender whose report is requested.
    pub tender_id: i64,
}

/// State of the tender report view.
#[derive(Debug, Clone)]
pub struct ReportView {
    tenders: Vec<TenderOffer>,
    requested_tender_id: Option<i64>,
    selected_tender_id: Option<i64>,
    state: ReportState,
    last_ticket: u64,
}

impl ReportView {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tenders: Vec::new(),
            requested_tender_id: None,
            selected_tender_id: None,
            state: ReportState::Idle,
            last_ticket: 0,
        }
    }

    /// The request that fetches the selectable tenders: newest first,
    /// expired ones included.
    #[must_use]
    pub fn tenders_request() -> PageRequest {
        PageRequest::new(1, REPORT_TENDER_PAGE_SIZE)
            .sorted_by(DEFAULT_SORT_FIELD, SortDirection::Descending)
            .with_include_expired(true)
    }

    #[must_use]
    pub fn tenders(&self) -> &[TenderOffer] {
        &self.tenders
    }

    #[must_use]
    pub const fn selected_tender_id(&self) -> Option<i64> {
        self.selected_tender_id
    }

    #[must_use]
    pub const fn state(&self) -> &ReportState {
        &self.state
    }

    /// Returns the loaded report, if any.
    #[must_use]
    pub const fn report(&self) -> Option<&OffersReport> {
        match &self.state {
            ReportState::Loaded(report) => Some(report),
            _ => None,
        }
    }

    /// Returns the participants of the loaded report, empty otherwise.
    #[must_use]
    pub fn participants(&self) -> &[OfferParticipant] {
        self.report()
            .map(|report| report.participants.as_slice())
            .unwrap_or_default()
    }

    /// Returns the failure message, if the latest report request failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ReportState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Asks for the report of `tender_id`, typically from a link.
    ///
    /// Ids of 0 or below are ignored. The request is remembered until the
    /// tender list contains the id. Returns the id when it can be selected
    /// right away.
    pub fn request_tender(&mut self, tender_id: i64) -> Option<i64> {
        self.requested_tender_id = (tender_id > 0).then_some(tender_id);
        self.apply_requested()
    }

    /// Selects `tender_id` directly.
    pub const fn select(&mut self, tender_id: i64) {
        self.selected_tender_id = Some(tender_id);
    }

    /// Applies the outcome of the tender list request.
    ///
    /// Selects the requested tender if the list contains it. Otherwise the
    /// current selection stays while the list still contains it, and the
    /// first tender is selected in its place. Returns the newly selected id.
    /// A failed request clears the list.
    pub fn apply_tenders(
        &mut self,
        outcome: GatewayResult<PageResult<TenderOffer>>,
    ) -> Option<i64> {
        match outcome {
            Ok(response) if response.is_success => {
                self.tenders = response.result.map(|page| page.records).unwrap_or_default();
            }
            Ok(response) => {
                debug!(
                    message = %response.message,
                    "Tender list for report rejected"
                );
                self.tenders.clear();
                return None;
            }
            Err(e) => {
                debug!(?e, "Tender list for report failed");
                self.tenders.clear();
                return None;
            }
        }

        if let Some(id) = self.apply_requested() {
            return Some(id);
        }
        if self
            .selected_tender_id
            .is_some_and(|selected| self.contains(selected))
        {
            return None;
        }

        // The selected tender is gone, e.g. deleted since the last load
        let first: Option<i64> = self.tenders.first().map(|tender| tender.id);
        self.selected_tender_id = first;
        first
    }

    /// Starts loading the selected tender's report.
    ///
    /// Returns `None` when no tender is selected. Clears the previous
    /// report.
    pub fn begin_report(&mut self) -> Option<PendingReport> {
        let tender_id: i64 = self.selected_tender_id.filter(|id| *id > 0)?;
        self.last_ticket += 1;
        self.state = ReportState::Loading;
        Some(PendingReport {
            ticket: self.last_ticket,
            tender_id,
        })
    }

    /// Applies the outcome of the report request identified by `ticket`.
    pub fn complete_report(
        &mut self,
        ticket: u64,
        outcome: GatewayResult<OffersReport>,
    ) -> Completion {
        if ticket != self.last_ticket {
            return Completion::Stale;
        }

        self.state = match outcome {
            Ok(response) if response.is_success => {
                ReportState::Loaded(response.result.unwrap_or_default())
            }
            Ok(response) => ReportState::Failed {
                message: if response.message.trim().is_empty() {
                    REPORT_FAILURE_MESSAGE.to_string()
                } else {
                    response.message
                },
            },
            Err(e) => ReportState::Failed {
                message: e.user_message(),
            },
        };
        Completion::Applied
    }

    /// Fetches the tender list, then the selected tender's report.
    ///
    /// Returns `None` when no tender could be selected.
    pub async fn load<G: AdminGateway + ?Sized>(&mut self, gateway: &G) -> Option<Completion> {
        let tenders: GatewayResult<PageResult<TenderOffer>> =
            gateway.list_tenders(&Self::tenders_request()).await;
        self.apply_tenders(tenders);

        let pending: PendingReport = self.begin_report()?;
        let report: GatewayResult<OffersReport> = gateway.tender_report(pending.tender_id).await;
        Some(self.complete_report(pending.ticket, report))
    }

    fn contains(&self, tender_id: i64) -> bool {
        self.tenders.iter().any(|tender| tender.id == tender_id)
    }

    fn apply_requested(&mut self) -> Option<i64> {
        let requested: i64 = self.requested_tender_id?;
        if self.contains(requested) {
            self.selected_tender_id = Some(requested);
            self.requested_tender_id = None;
            Some(requested)
        } else {
            None
        }
    }
}

impl Default for ReportView {
    fn default() -> Self {
        Self::new()
    }
}
