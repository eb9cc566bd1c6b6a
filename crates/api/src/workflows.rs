// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutating actions of the admin and contractor views.
//!
//! Every action validates its input before any request is sent, and treats
//! a response with `IsSuccess == false` as [`ApiError::Rejected`] carrying
//! the service's message.

use crate::error::{ApiError, AuthError};
use crate::gateway::{AdminGateway, AuthGateway, ContractorGateway};
use crate::request_response::ApiResponse;
use crate::session::{Role, UserSession};
use rust_decimal::Decimal;
use tenderboard::TenderHub;
use tenderboard_domain::{
    Offer, TenderDraft, TenderOffer, validate_offer_price, validate_tender_draft,
};
use tracing::{debug, info, warn};

/// Validates and saves a tender.
///
/// A draft with id 0 is created, anything else updated. After a creation
/// the hub announces the new tender; after either, the counts are
/// refreshed.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] before any request if the draft is
/// invalid, [`ApiError::Rejected`] if the service refuses, and transport or
/// decoding errors from the gateway.
pub async fn save_tender<G: AdminGateway + ?Sized>(
    gateway: &G,
    hub: &TenderHub,
    draft: TenderDraft,
) -> Result<ApiResponse<TenderOffer>, ApiError> {
    let tender: TenderOffer = validate_tender_draft(draft)?;
    let is_new: bool = tender.is_new();

    let response: ApiResponse<TenderOffer> = if is_new {
        gateway.create_tender(&tender).await?
    } else {
        gateway.update_tender(&tender).await?
    };
    let response: ApiResponse<TenderOffer> = ensure_success(response)?;
    info!(id = tender.id, is_new, "Saved tender");

    if is_new {
        hub.notify_tender_created(Some(tender.title.clone()));
    }
    refresh_counts(gateway, hub).await;
    Ok(response)
}

/// Deletes a tender and refreshes the counts.
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] if the service refuses, and transport or
/// decoding errors from the gateway.
pub async fn delete_tender<G: AdminGateway + ?Sized>(
    gateway: &G,
    hub: &TenderHub,
    id: i64,
) -> Result<ApiResponse<bool>, ApiError> {
    let response: ApiResponse<bool> = ensure_success(gateway.delete_tender(id).await?)?;
    info!(id, "Deleted tender");
    refresh_counts(gateway, hub).await;
    Ok(response)
}

/// Fetches the counts and hands them to the hub.
///
/// Failures leave the hub untouched and are only logged. Returns whether
/// the hub was updated.
pub async fn refresh_counts<G: AdminGateway + ?Sized>(gateway: &G, hub: &TenderHub) -> bool {
    match gateway.tender_counts().await {
        Ok(response) if response.is_success => match response.result {
            Some(counts) => {
                debug!(?counts, "Refreshed tender counts");
                hub.update_counts(counts);
                true
            }
            None => {
                warn!("Counts response carried no result");
                false
            }
        },
        Ok(response) => {
            warn!(
                message = %response.message,
                status_code = response.status_code,
                "Counts request rejected"
            );
            false
        }
        Err(e) => {
            warn!(?e, "Counts request failed");
            false
        }
    }
}

/// Validates and places an offer on `tender`.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] before any request if the price is
/// missing or outside the tender's band, [`ApiError::Rejected`] if the
/// service refuses, and transport or decoding errors from the gateway.
pub async fn submit_offer<G: ContractorGateway + ?Sized>(
    gateway: &G,
    tender: &TenderOffer,
    price: Option<Decimal>,
) -> Result<ApiResponse<Offer>, ApiError> {
    let price: Decimal = validate_offer_price(price, Some(tender.price_band()))?;
    let offer: Offer = Offer::draft(tender.id, price);

    let response: ApiResponse<Offer> = ensure_success(gateway.submit_offer(&offer).await?)?;
    info!(tender_id = tender.id, %price, "Submitted offer");
    Ok(response)
}

/// Validates and changes the price of `offer`.
///
/// The price is checked against the embedded tender's band when the offer
/// carries one.
///
/// # Errors
///
/// Same as [`submit_offer`].
pub async fn update_offer<G: ContractorGateway + ?Sized>(
    gateway: &G,
    offer: &Offer,
    price: Option<Decimal>,
) -> Result<ApiResponse<Offer>, ApiError> {
    let price: Decimal = validate_offer_price(price, offer.price_band())?;
    let updated: Offer = Offer {
        price_offer: price,
        ..offer.clone()
    };

    let response: ApiResponse<Offer> = ensure_success(gateway.update_offer(&updated).await?)?;
    info!(id = offer.id, %price, "Updated offer");
    Ok(response)
}

/// Withdraws an offer.
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] if the service refuses, and transport or
/// decoding errors from the gateway.
pub async fn withdraw_offer<G: ContractorGateway + ?Sized>(
    gateway: &G,
    id: i64,
) -> Result<ApiResponse<bool>, ApiError> {
    let response: ApiResponse<bool> = ensure_success(gateway.withdraw_offer(id).await?)?;
    info!(id, "Withdrew offer");
    Ok(response)
}

/// Logs in and prepares the gateway for the new session.
///
/// An administrator's login also fetches the initial counts.
///
/// # Errors
///
/// Returns [`ApiError::InvalidInput`] for empty credentials,
/// [`AuthError::AuthenticationFailed`] when the provider refuses or returns
/// no token, and transport or decoding errors from the gateway.
pub async fn login<G: AuthGateway + AdminGateway + ?Sized>(
    gateway: &G,
    hub: &TenderHub,
    username: &str,
    password: &str,
) -> Result<UserSession, ApiError> {
    if username.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("username"),
            message: String::from("Username is required"),
        });
    }
    if password.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("password"),
            message: String::from("Password is required"),
        });
    }

    let response: ApiResponse<UserSession> = gateway.authenticate(username, password).await?;
    if !response.is_success {
        return Err(AuthError::AuthenticationFailed {
            reason: response.failure_message(),
        }
        .into());
    }
    let session: UserSession = response
        .result
        .filter(UserSession::is_logged_in)
        .ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("No token issued"),
        })?;

    info!(
        username = %session.username,
        roles = ?session.roles,
        "Logged in"
    );
    gateway.use_session(&session);
    if session.has_role(Role::Admin) {
        refresh_counts(gateway, hub).await;
    }
    Ok(session)
}

/// Ends the session and resets the hub.
pub fn logout(session: &mut UserSession, hub: &TenderHub) {
    info!(username = %session.username, "Logged out");
    session.clear();
    hub.reset_session();
}

fn ensure_success<T>(response: ApiResponse<T>) -> Result<ApiResponse<T>, ApiError> {
    if response.is_success {
        Ok(response)
    } else {
        Err(ApiError::Rejected {
            status_code: response.status_code,
            message: response.message,
        })
    }
}
