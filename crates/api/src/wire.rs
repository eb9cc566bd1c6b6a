// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lenient decoding of the remote service's JSON.
//!
//! Every field is optional on the wire. Records are rebuilt field by field
//! with an explicit default for anything missing, so a partial record never
//! fails a whole page. Dates are accepted as RFC 3339 or as offset-less
//! `YYYY-MM-DDTHH:MM:SS[.fraction]` (read as UTC). Prices are accepted as
//! JSON numbers or numeric strings.

use crate::error::ApiError;
use crate::request_response::{ApiResponse, PageRequest, PageResult};
use crate::session::{Role, UserSession};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;
use tenderboard_domain::{Offer, OfferParticipant, OffersReport, TenderCounts, TenderOffer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::warn;

/// The response envelope as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireApiResponse {
    pub is_success: Option<bool>,
    pub message: Option<String>,
    pub status_code: Option<u16>,
    pub result: Option<Value>,
}

impl WireApiResponse {
    /// Decodes the envelope and, on success, its payload as `W`, then maps
    /// the payload with `f`.
    ///
    /// A missing `IsSuccess` counts as failure. The payload of a failed
    /// response is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if a successful response carries a
    /// payload that is not a `W`.
    pub fn into_response<W, T>(self, f: impl FnOnce(W) -> T) -> Result<ApiResponse<T>, ApiError>
    where
        W: DeserializeOwned,
    {
        let is_success: bool = self.is_success.unwrap_or(false);
        let result: Option<T> = match self.result {
            Some(value) if is_success => {
                let wire: W = serde_json::from_value(value).map_err(|e| ApiError::Decode {
                    message: e.to_string(),
                })?;
                Some(f(wire))
            }
            _ => None,
        };

        Ok(ApiResponse {
            is_success,
            message: self.message.unwrap_or_default(),
            status_code: self.status_code.unwrap_or(0),
            result,
        })
    }
}

/// A page as received.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WirePageResult<W> {
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub pages_count: Option<u32>,
    #[serde(default)]
    pub records_count: Option<u64>,
    #[serde(default = "Option::default")]
    pub records: Option<Vec<W>>,
}

impl<W> WirePageResult<W> {
    /// Rebuilds the page, filling gaps from `request`.
    ///
    /// Records beyond the page size are dropped.
    #[must_use]
    pub fn into_domain<T>(self, request: &PageRequest, f: impl FnMut(W) -> T) -> PageResult<T> {
        let mut records: Vec<T> = self
            .records
            .unwrap_or_default()
            .into_iter()
            .map(f)
            .collect();
        let page_size: u32 = self
            .page_size
            .filter(|size| *size > 0)
            .unwrap_or(request.page_size);
        let limit: usize = usize::try_from(page_size).unwrap_or(usize::MAX);
        if records.len() > limit {
            warn!(
                received = records.len(),
                page_size,
                "Page holds more records than its size, truncating"
            );
            records.truncate(limit);
        }

        let records_count: u64 = self
            .records_count
            .unwrap_or_else(|| u64::try_from(records.len()).unwrap_or(u64::MAX));
        PageResult {
            page_number: self
                .page_number
                .filter(|n| *n > 0)
                .unwrap_or(request.page_number),
            page_size,
            pages_count: self
                .pages_count
                .unwrap_or_else(|| PageResult::<T>::pages_for(records_count, page_size)),
            records_count,
            records,
        }
    }
}

/// A tender as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireTenderOffer {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_datetime")]
    pub begin_date: Option<OffsetDateTime>,
    #[serde(deserialize_with = "lenient_datetime")]
    pub end_date: Option<OffsetDateTime>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub from_price: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub to_price: Option<Decimal>,
    pub report: Option<WireOffersReport>,
}

impl WireTenderOffer {
    /// Rebuilds the tender. Missing dates become the Unix epoch, missing
    /// prices zero, missing text empty.
    #[must_use]
    pub fn into_domain(self) -> TenderOffer {
        TenderOffer {
            id: self.id.unwrap_or(0),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            begin_date: self.begin_date.unwrap_or(OffsetDateTime::UNIX_EPOCH),
            end_date: self.end_date.unwrap_or(OffsetDateTime::UNIX_EPOCH),
            from_price: self.from_price.unwrap_or(Decimal::ZERO),
            to_price: self.to_price.unwrap_or(Decimal::ZERO),
            report: self.report.map(WireOffersReport::into_domain),
        }
    }
}

/// An offers report as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireOffersReport {
    pub users_count: Option<i64>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub min_price_offer: Option<Decimal>,
    pub participants: Option<Vec<WireOfferParticipant>>,
    pub winner: Option<WireOfferParticipant>,
}

impl WireOffersReport {
    /// Rebuilds the report. A negative user count is treated as unknown.
    #[must_use]
    pub fn into_domain(self) -> OffersReport {
        OffersReport {
            users_count: self.users_count.and_then(|n| u64::try_from(n).ok()),
            min_price_offer: self.min_price_offer,
            participants: self
                .participants
                .unwrap_or_default()
                .into_iter()
                .map(WireOfferParticipant::into_domain)
                .collect(),
            winner: self.winner.map(WireOfferParticipant::into_domain),
        }
    }
}

/// A report participant as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireOfferParticipant {
    pub offer_id: Option<i64>,
    pub user_id: Option<i64>,
    #[serde(alias = "UserName")]
    pub username: Option<String>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub price_offer: Option<Decimal>,
    #[serde(deserialize_with = "lenient_datetime")]
    pub date: Option<OffsetDateTime>,
}

impl WireOfferParticipant {
    #[must_use]
    pub fn into_domain(self) -> OfferParticipant {
        OfferParticipant {
            offer_id: self.offer_id.unwrap_or(0),
            user_id: self.user_id,
            username: self.username,
            price_offer: self.price_offer.unwrap_or(Decimal::ZERO),
            date: self.date,
        }
    }
}

/// An offer as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireOffer {
    pub id: Option<i64>,
    pub tender_offer_id: Option<i64>,
    pub user_id: Option<i64>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub price_offer: Option<Decimal>,
    #[serde(deserialize_with = "lenient_datetime")]
    pub date: Option<OffsetDateTime>,
    pub tender_offer: Option<WireTenderOffer>,
}

impl WireOffer {
    /// Rebuilds the offer. A missing tender id is taken from the embedded
    /// tender when there is one.
    #[must_use]
    pub fn into_domain(self) -> Offer {
        let tender_offer: Option<TenderOffer> = self.tender_offer.map(WireTenderOffer::into_domain);
        let tender_offer_id: i64 = self
            .tender_offer_id
            .or_else(|| tender_offer.as_ref().map(|t| t.id))
            .unwrap_or(0);

        Offer {
            id: self.id.unwrap_or(0),
            tender_offer_id,
            user_id: self.user_id,
            price_offer: self.price_offer.unwrap_or(Decimal::ZERO),
            date: self.date,
            tender_offer,
        }
    }
}

/// The counts snapshot as received.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireCounts {
    pub total: Option<i64>,
    pub open: Option<i64>,
    pub expired: Option<i64>,
}

impl WireCounts {
    /// Rebuilds the snapshot. A missing total is derived from the parts.
    #[must_use]
    pub fn into_domain(self) -> TenderCounts {
        let open: i64 = self.open.unwrap_or(0);
        let expired: i64 = self.expired.unwrap_or(0);
        let total: i64 = self.total.unwrap_or_else(|| open.saturating_add(expired));
        TenderCounts::new(total, open, expired)
    }
}

/// The login result as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireLoginResult {
    pub token: Option<String>,
    pub user: Option<WireUser>,
}

/// The user part of a login result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WireUser {
    pub id: Option<i64>,
    #[serde(alias = "UserName")]
    pub username: Option<String>,
    pub roles: Option<Vec<String>>,
}

impl WireLoginResult {
    /// Rebuilds the session. Unknown role names are skipped.
    #[must_use]
    pub fn into_domain(self) -> UserSession {
        let user: WireUser = self.user.unwrap_or_default();
        let roles: Vec<Role> = user
            .roles
            .unwrap_or_default()
            .iter()
            .filter_map(|name| {
                let role: Option<Role> = Role::parse(name);
                if role.is_none() {
                    warn!(role = %name, "Ignoring unknown role");
                }
                role
            })
            .collect();

        UserSession {
            token: self.token.unwrap_or_default(),
            user_id: user.id,
            username: user.username.unwrap_or_default(),
            roles,
        }
    }
}

/// Parses a wire date.
///
/// Accepts RFC 3339, offset-less date-times (read as UTC) and bare dates
/// (midnight UTC).
#[must_use]
pub fn parse_wire_date(raw: &str) -> Option<OffsetDateTime> {
    let raw: &str = raw.trim();
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }
    let local = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
    );
    if let Ok(parsed) = PrimitiveDateTime::parse(raw, &local) {
        return Some(parsed.assume_utc());
    }
    let date_only = format_description!("[year]-[month]-[day]");
    time::Date::parse(raw, &date_only)
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// Reads a wire price from a JSON number or numeric string.
#[must_use]
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| Decimal::from_str(&n.to_string()).ok())
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    };
    Ok(raw.as_deref().and_then(|s| {
        let parsed: Option<OffsetDateTime> = parse_wire_date(s);
        if parsed.is_none() {
            warn!(date = %s, "Ignoring unparseable date");
        }
        parsed
    }))
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value))
}
