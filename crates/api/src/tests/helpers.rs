// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tenderboard_domain::{
    Offer, OfferParticipant, OffersReport, TenderCounts, TenderDraft, TenderOffer,
};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    AdminGateway, ApiError, ApiResponse, AuthGateway, ContractorGateway, GatewayResult, PageRequest,
    PageResult, Role, UserSession,
};

pub fn create_test_tender(id: i64) -> TenderOffer {
    TenderOffer {
        id,
        title: format!("Tender {id}"),
        description: String::from("Road resurfacing"),
        begin_date: datetime!(2024-01-05 08:00 UTC),
        end_date: datetime!(2024-01-10 17:00 UTC),
        from_price: dec!(100),
        to_price: dec!(500),
        report: None,
    }
}

pub fn create_test_tenders(count: i64) -> Vec<TenderOffer> {
    (1..=count).map(create_test_tender).collect()
}

pub fn create_test_draft() -> TenderDraft {
    TenderDraft {
        id: 0,
        title: String::from("New bridge"),
        description: String::from("Pedestrian bridge over the canal"),
        begin_date: Some(datetime!(2024-01-05 00:00 UTC)),
        end_date: Some(datetime!(2024-01-10 00:00 UTC)),
        from_price: Some(dec!(100)),
        to_price: Some(dec!(500)),
    }
}

pub fn create_test_participant(offer_id: i64, user_id: i64, price: Decimal) -> OfferParticipant {
    OfferParticipant {
        offer_id,
        user_id: Some(user_id),
        username: None,
        price_offer: price,
        date: Some(datetime!(2024-01-06 10:30 UTC)),
    }
}

pub fn create_test_session(roles: &[Role]) -> UserSession {
    UserSession {
        token: String::from("token-123"),
        user_id: Some(42),
        username: String::from("alice"),
        roles: roles.to_vec(),
    }
}

/// In-memory stand-in for the remote service.
///
/// Every call is recorded by name. A scripted rejection or transport
/// failure applies to the next call only.
#[derive(Default)]
pub struct FakeGateway {
    pub tenders: Mutex<Vec<TenderOffer>>,
    pub offers: Mutex<Vec<Offer>>,
    pub counts: Mutex<TenderCounts>,
    pub report: Mutex<Option<OffersReport>>,
    pub login_result: Mutex<Option<UserSession>>,
    pub active_session: Mutex<Option<UserSession>>,
    calls: Mutex<Vec<String>>,
    rejection: Mutex<Option<(u16, String)>>,
    transport_down: AtomicBool,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tenders(tenders: Vec<TenderOffer>) -> Self {
        let gateway: Self = Self::default();
        *gateway.tenders.lock().unwrap() = tenders;
        gateway
    }

    pub fn reject_next(&self, status_code: u16, message: &str) {
        *self.rejection.lock().unwrap() = Some((status_code, message.to_string()));
    }

    pub fn fail_next_transport(&self) {
        self.transport_down.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_counts(&self, counts: TenderCounts) {
        *self.counts.lock().unwrap() = counts;
    }

    fn respond<T>(&self, name: &str, ok: impl FnOnce() -> ApiResponse<T>) -> GatewayResult<T> {
        self.calls.lock().unwrap().push(name.to_string());
        if self.transport_down.swap(false, Ordering::SeqCst) {
            return Err(ApiError::Transport {
                message: String::from("connection refused"),
            });
        }
        if let Some((status_code, message)) = self.rejection.lock().unwrap().take() {
            return Ok(ApiResponse::failure(status_code, message));
        }
        Ok(ok())
    }
}

#[async_trait]
impl AdminGateway for FakeGateway {
    async fn list_tenders(&self, request: &PageRequest) -> GatewayResult<PageResult<TenderOffer>> {
        self.respond("list_tenders", || {
            ApiResponse::success(PageResult::paginate(&self.tenders.lock().unwrap(), request))
        })
    }

    async fn get_tender(&self, id: i64) -> GatewayResult<TenderOffer> {
        self.respond("get_tender", || {
            match self.tenders.lock().unwrap().iter().find(|t| t.id == id) {
                Some(tender) => ApiResponse::success(tender.clone()),
                None => ApiResponse::failure(404, "Tender not found"),
            }
        })
    }

    async fn create_tender(&self, tender: &TenderOffer) -> GatewayResult<TenderOffer> {
        self.respond("create_tender", || {
            let mut tenders = self.tenders.lock().unwrap();
            let id: i64 = tenders.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            let created: TenderOffer = TenderOffer {
                id,
                ..tender.clone()
            };
            tenders.push(created.clone());
            ApiResponse::success(created)
        })
    }

    async fn update_tender(&self, tender: &TenderOffer) -> GatewayResult<TenderOffer> {
        self.respond("update_tender", || {
            let mut tenders = self.tenders.lock().unwrap();
            match tenders.iter_mut().find(|t| t.id == tender.id) {
                Some(existing) => {
                    *existing = tender.clone();
                    ApiResponse::success(tender.clone())
                }
                None => ApiResponse::failure(404, "Tender not found"),
            }
        })
    }

    async fn delete_tender(&self, id: i64) -> GatewayResult<bool> {
        self.respond("delete_tender", || {
            let mut tenders = self.tenders.lock().unwrap();
            let before: usize = tenders.len();
            tenders.retain(|t| t.id != id);
            ApiResponse::success(tenders.len() < before)
        })
    }

    async fn tender_report(&self, _id: i64) -> GatewayResult<OffersReport> {
        self.respond("tender_report", || {
            ApiResponse::success(self.report.lock().unwrap().clone().unwrap_or_default())
        })
    }

    async fn tender_counts(&self) -> GatewayResult<TenderCounts> {
        self.respond("tender_counts", || {
            ApiResponse::success(*self.counts.lock().unwrap())
        })
    }
}

#[async_trait]
impl ContractorGateway for FakeGateway {
    async fn list_open_tenders(
        &self,
        request: &PageRequest,
    ) -> GatewayResult<PageResult<TenderOffer>> {
        self.respond("list_open_tenders", || {
            ApiResponse::success(PageResult::paginate(&self.tenders.lock().unwrap(), request))
        })
    }

    async fn list_my_offers(&self, request: &PageRequest) -> GatewayResult<PageResult<Offer>> {
        self.respond("list_my_offers", || {
            ApiResponse::success(PageResult::paginate(&self.offers.lock().unwrap(), request))
        })
    }

    async fn submit_offer(&self, offer: &Offer) -> GatewayResult<Offer> {
        self.respond("submit_offer", || {
            let mut offers = self.offers.lock().unwrap();
            let placed: Offer = Offer {
                id: i64::try_from(offers.len()).unwrap() + 1,
                date: Some(OffsetDateTime::UNIX_EPOCH),
                ..offer.clone()
            };
            offers.push(placed.clone());
            ApiResponse::success(placed)
        })
    }

    async fn update_offer(&self, offer: &Offer) -> GatewayResult<Offer> {
        self.respond("update_offer", || {
            let mut offers = self.offers.lock().unwrap();
            match offers.iter_mut().find(|o| o.id == offer.id) {
                Some(existing) => {
                    *existing = offer.clone();
                    ApiResponse::success(offer.clone())
                }
                None => ApiResponse::failure(404, "Offer not found"),
            }
        })
    }

    async fn withdraw_offer(&self, id: i64) -> GatewayResult<bool> {
        self.respond("withdraw_offer", || {
            let mut offers = self.offers.lock().unwrap();
            let before: usize = offers.len();
            offers.retain(|o| o.id != id);
            ApiResponse::success(offers.len() < before)
        })
    }
}

#[async_trait]
impl AuthGateway for FakeGateway {
    async fn authenticate(&self, _username: &str, _password: &str) -> GatewayResult<UserSession> {
        self.respond("authenticate", || match self.login_result.lock().unwrap().clone() {
            Some(session) => ApiResponse::success(session),
            None => ApiResponse::failure(401, "Invalid username or password"),
        })
    }

    fn use_session(&self, session: &UserSession) {
        *self.active_session.lock().unwrap() = Some(session.clone());
    }
}
