// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Contracts between views and the remote Tender/Offer service.
//!
//! An `Err` from a gateway means no usable response arrived (transport or
//! decoding failure). A response the service answered with
//! `IsSuccess == false` is an `Ok` carrying that envelope; callers decide
//! what a rejection means for them.

use crate::error::ApiError;
use crate::request_response::{ApiResponse, PageRequest, PageResult};
use crate::session::UserSession;
use async_trait::async_trait;
use tenderboard_domain::{Offer, OffersReport, TenderCounts, TenderOffer};

/// Outcome of one gateway call.
pub type GatewayResult<T> = Result<ApiResponse<T>, ApiError>;

/// Operations of the administrator area.
#[async_trait]
pub trait AdminGateway: Send + Sync {
    /// Fetch one page of tenders.
    async fn list_tenders(&self, request: &PageRequest) -> GatewayResult<PageResult<TenderOffer>>;

    /// Fetch a single tender.
    async fn get_tender(&self, id: i64) -> GatewayResult<TenderOffer>;

    /// Create a tender. The tender's id is 0.
    async fn create_tender(&self, tender: &TenderOffer) -> GatewayResult<TenderOffer>;

    /// Replace an existing tender.
    async fn update_tender(&self, tender: &TenderOffer) -> GatewayResult<TenderOffer>;

    /// Remove a tender.
    async fn delete_tender(&self, id: i64) -> GatewayResult<bool>;

    /// Fetch the offers report of a tender.
    async fn tender_report(&self, id: i64) -> GatewayResult<OffersReport>;

    /// Fetch the total, open and expired tender counts.
    async fn tender_counts(&self) -> GatewayResult<TenderCounts>;
}

/// Operations of the contractor area.
#[async_trait]
pub trait ContractorGateway: Send + Sync {
    /// Fetch one page of tenders open for offers.
    async fn list_open_tenders(
        &self,
        request: &PageRequest,
    ) -> GatewayResult<PageResult<TenderOffer>>;

    /// Fetch one page of the logged-in contractor's offers.
    async fn list_my_offers(&self, request: &PageRequest) -> GatewayResult<PageResult<Offer>>;

    /// Place a new offer. The offer's id is 0.
    async fn submit_offer(&self, offer: &Offer) -> GatewayResult<Offer>;

    /// Change the price of an existing offer.
    async fn update_offer(&self, offer: &Offer) -> GatewayResult<Offer>;

    /// Withdraw an offer.
    async fn withdraw_offer(&self, id: i64) -> GatewayResult<bool>;
}

/// The authentication provider.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a session.
    async fn authenticate(&self, username: &str, password: &str) -> GatewayResult<UserSession>;

    /// Make subsequent calls on this gateway act as `session`.
    ///
    /// Gateways without per-user state ignore this.
    fn use_session(&self, _session: &UserSession) {}
}
