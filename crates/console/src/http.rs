// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Gateway speaking to the remote service over HTTP.
//!
//! Every operation is a JSON `POST` with a bearer token. Whether an
//! operation succeeded is read from the envelope's `IsSuccess`, not from the
//! HTTP status, so a 400 carrying a well-formed envelope is a rejection and
//! not a transport failure.

use crate::config::ClientConfig;
use crate::error::ConsoleError;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::{PoisonError, RwLock};
use tenderboard_api::wire::{
    WireApiResponse, WireCounts, WireLoginResult, WireOffer, WireOffersReport, WirePageResult,
    WireTenderOffer,
};
use tenderboard_api::{
    AdminGateway, ApiError, ApiResponse, AuthGateway, ContractorGateway, GatewayResult,
    LoginRequest, PageRequest, PageResult, RemoveRequest, UserSession,
};
use tenderboard_domain::{Offer, OffersReport, TenderCounts, TenderOffer};
use tracing::{debug, warn};

const AUTHENTICATE: &str = "auth/Authenticate";
const ADMIN_LIST: &str = "Admin/GetList";
const ADMIN_GET: &str = "Admin/Get";
const ADMIN_ADD: &str = "Admin/Add";
const ADMIN_UPDATE: &str = "Admin/Update";
const ADMIN_REMOVE: &str = "Admin/Remove";
const ADMIN_REPORT: &str = "Admin/GetReport";
const ADMIN_COUNTS: &str = "Admin/GetTenderCounts";
const CONTRACTOR_OPEN_TENDERS: &str = "Contractor/GetListTenderOffers";
const CONTRACTOR_MY_OFFERS: &str = "Contractor/GetListMyOffers";
const CONTRACTOR_ADD: &str = "Contractor/Add";
const CONTRACTOR_UPDATE: &str = "Contractor/Update";
const CONTRACTOR_REMOVE: &str = "Contractor/Remove";

/// Client for the remote Tender/Offer service.
pub struct HttpGateway {
    client: reqwest::Client,
    config: ClientConfig,
    token: RwLock<Option<String>>,
}

impl HttpGateway {
    /// Creates a gateway for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Client`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ConsoleError> {
        let client: reqwest::Client = reqwest::Client::builder().timeout(config.timeout).build()?;
        let token: Option<String> = config.token.clone();

        Ok(Self {
            client,
            config,
            token: RwLock::new(token),
        })
    }

    /// Returns the bearer token currently in use.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers: HeaderMap = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.token() {
            let value: HeaderValue = HeaderValue::from_str(&format!("Bearer {token}")).map_err(
                |_| ApiError::InvalidInput {
                    field: String::from("token"),
                    message: String::from("Invalid access token format"),
                },
            )?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    async fn post<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        query: Option<(&str, i64)>,
        body: &B,
    ) -> Result<WireApiResponse, ApiError> {
        let url: String = self.config.endpoint(path);
        debug!(%url, ?query, "Sending request");

        let mut request = self.client.post(&url).headers(self.headers()?).json(body);
        if let Some((name, value)) = query {
            request = request.query(&[(name, value)]);
        }

        let response: reqwest::Response = request.send().await.map_err(|e| {
            warn!(?e, %url, "Request failed");
            ApiError::Transport {
                message: e.to_string(),
            }
        })?;
        Self::parse_response(response).await
    }

    async fn parse_response(response: reqwest::Response) -> Result<WireApiResponse, ApiError> {
        let status: reqwest::StatusCode = response.status();
        let body: String = response.text().await.map_err(|e| ApiError::Transport {
            message: e.to_string(),
        })?;
        debug!(%status, body_len = body.len(), "Received response");

        match serde_json::from_str::<WireApiResponse>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => Err(ApiError::Transport {
                message: format!("HTTP {status}"),
            }),
            Err(e) => {
                warn!(?e, %status, "Failed to decode response envelope");
                Err(ApiError::Decode {
                    message: e.to_string(),
                })
            }
        }
    }

    async fn call<W, T>(
        &self,
        path: &str,
        query: Option<(&str, i64)>,
        body: &(impl Serialize + Sync + ?Sized),
        f: impl FnOnce(W) -> T + Send,
    ) -> GatewayResult<T>
    where
        W: DeserializeOwned,
    {
        self.post(path, query, body).await?.into_response(f)
    }

    async fn page<W, T>(
        &self,
        path: &str,
        request: &PageRequest,
        f: impl FnMut(W) -> T + Send,
    ) -> GatewayResult<PageResult<T>>
    where
        W: DeserializeOwned,
    {
        self.call(path, None, request, |page: WirePageResult<W>| {
            page.into_domain(request, f)
        })
        .await
    }
}

#[async_trait]
impl AdminGateway for HttpGateway {
    async fn list_tenders(&self, request: &PageRequest) -> GatewayResult<PageResult<TenderOffer>> {
        self.page(ADMIN_LIST, request, WireTenderOffer::into_domain)
            .await
    }

    async fn get_tender(&self, id: i64) -> GatewayResult<TenderOffer> {
        self.call(
            ADMIN_GET,
            Some(("id", id)),
            &json!({}),
            WireTenderOffer::into_domain,
        )
        .await
    }

    async fn create_tender(&self, tender: &TenderOffer) -> GatewayResult<TenderOffer> {
        self.call(ADMIN_ADD, None, tender, WireTenderOffer::into_domain)
            .await
    }

    async fn update_tender(&self, tender: &TenderOffer) -> GatewayResult<TenderOffer> {
        self.call(ADMIN_UPDATE, None, tender, WireTenderOffer::into_domain)
            .await
    }

    async fn delete_tender(&self, id: i64) -> GatewayResult<bool> {
        self.call(ADMIN_REMOVE, None, &RemoveRequest { id }, removal_flag)
            .await
    }

    async fn tender_report(&self, id: i64) -> GatewayResult<OffersReport> {
        self.call(
            ADMIN_REPORT,
            Some(("id", id)),
            &json!({}),
            WireOffersReport::into_domain,
        )
        .await
    }

    async fn tender_counts(&self) -> GatewayResult<TenderCounts> {
        self.call(ADMIN_COUNTS, None, &json!({}), WireCounts::into_domain)
            .await
    }
}

#[async_trait]
impl ContractorGateway for HttpGateway {
    async fn list_open_tenders(
        &self,
        request: &PageRequest,
    ) -> GatewayResult<PageResult<TenderOffer>> {
        self.page(
            CONTRACTOR_OPEN_TENDERS,
            request,
            WireTenderOffer::into_domain,
        )
        .await
    }

    async fn list_my_offers(&self, request: &PageRequest) -> GatewayResult<PageResult<Offer>> {
        self.page(CONTRACTOR_MY_OFFERS, request, WireOffer::into_domain)
            .await
    }

    async fn submit_offer(&self, offer: &Offer) -> GatewayResult<Offer> {
        self.call(CONTRACTOR_ADD, None, offer, WireOffer::into_domain)
            .await
    }

    async fn update_offer(&self, offer: &Offer) -> GatewayResult<Offer> {
        self.call(CONTRACTOR_UPDATE, None, offer, WireOffer::into_domain)
            .await
    }

    async fn withdraw_offer(&self, id: i64) -> GatewayResult<bool> {
        self.call(CONTRACTOR_REMOVE, None, &RemoveRequest { id }, removal_flag)
            .await
    }
}

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn authenticate(&self, username: &str, password: &str) -> GatewayResult<UserSession> {
        let body: LoginRequest = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.call(AUTHENTICATE, None, &body, WireLoginResult::into_domain)
            .await
    }

    fn use_session(&self, session: &UserSession) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) =
            session.bearer().map(str::to_string);
    }
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("base_url", &self.config.base_url)
            .field("has_token", &self.token().is_some())
            .finish_non_exhaustive()
    }
}

// Remove endpoints answer with a bool or with the removed record
fn removal_flag(value: serde_json::Value) -> bool {
    serde_json::from_value::<bool>(value).unwrap_or(true)
}

/// Unwraps an API response into its payload.
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] if the service refused, and
/// [`ApiError::Decode`] if a successful response carried no payload.
pub fn expect_result<T>(response: ApiResponse<T>) -> Result<T, ApiError> {
    response.into_result()?.ok_or_else(|| ApiError::Decode {
        message: String::from("Response carried no result"),
    })
}
