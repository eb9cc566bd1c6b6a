// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Maximum number of characters allowed in a tender title.
pub const TITLE_MAX_CHARS: usize = 100;

/// A published procurement opportunity with a price band and validity window.
///
/// An `id` of 0 marks a tender that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TenderOffer {
    /// Server-assigned identifier, 0 when unsaved.
    pub id: i64,
    /// Short display title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Start of the validity window.
    #[serde(with = "time::serde::rfc3339")]
    pub begin_date: OffsetDateTime,
    /// End of the validity window.
    #[serde(with = "time::serde::rfc3339")]
    pub end_date: OffsetDateTime,
    /// Lowest acceptable offer.
    pub from_price: Decimal,
    /// Highest acceptable offer.
    pub to_price: Decimal,
    /// Server-computed participation aggregate, when the service attached one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<OffersReport>,
}

impl TenderOffer {
    /// Returns whether this tender has never been saved.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id == 0
    }

    /// Returns the tender's price band.
    #[must_use]
    pub const fn price_band(&self) -> PriceBand {
        PriceBand {
            from_price: self.from_price,
            to_price: self.to_price,
        }
    }

    /// Returns whether the tender's end date lies before `now`.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.end_date < now
    }
}

/// Inclusive price range an offer has to fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBand {
    /// Lower bound (inclusive).
    pub from_price: Decimal,
    /// Upper bound (inclusive).
    pub to_price: Decimal,
}

impl PriceBand {
    /// Returns whether `price` lies within the band.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.from_price && price <= self.to_price
    }
}

/// The values an administrator has entered for a tender, before validation.
///
/// Mirrors an edit form: anything may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenderDraft {
    /// Identifier of the tender being edited, 0 for a new one.
    pub id: i64,
    /// Entered title.
    pub title: String,
    /// Entered description.
    pub description: String,
    /// Entered begin date.
    pub begin_date: Option<OffsetDateTime>,
    /// Entered end date.
    pub end_date: Option<OffsetDateTime>,
    /// Entered lower price bound.
    pub from_price: Option<Decimal>,
    /// Entered upper price bound.
    pub to_price: Option<Decimal>,
}

impl TenderDraft {
    /// Creates a draft pre-filled from an existing tender.
    #[must_use]
    pub fn from_tender(tender: &TenderOffer) -> Self {
        Self {
            id: tender.id,
            title: tender.title.clone(),
            description: tender.description.clone(),
            begin_date: Some(tender.begin_date),
            end_date: Some(tender.end_date),
            from_price: Some(tender.from_price),
            to_price: Some(tender.to_price),
        }
    }
}

/// Server-computed aggregate over a tender's offers.
///
/// Read-only on the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OffersReport {
    /// Number of distinct participants, if known.
    pub users_count: Option<u64>,
    /// Lowest offered price, if any offer exists.
    pub min_price_offer: Option<Decimal>,
    /// Participants in server order.
    pub participants: Vec<OfferParticipant>,
    /// The winning participant, if one has been determined.
    pub winner: Option<OfferParticipant>,
}

/// One contractor's participation in a tender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferParticipant {
    /// Identifier of the underlying offer.
    pub offer_id: i64,
    /// Identifier of the contractor, if disclosed.
    pub user_id: Option<i64>,
    /// Display name of the contractor, if known.
    pub username: Option<String>,
    /// The offered price.
    pub price_offer: Decimal,
    /// When the offer was submitted.
    #[serde(with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
}

impl OfferParticipant {
    /// Returns the name to show for this participant.
    ///
    /// Falls back to `Contractor {user_id}` when no username is known, and to
    /// an empty string when neither is.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.username, self.user_id) {
            (Some(name), _) if !name.trim().is_empty() => name.clone(),
            (_, Some(user_id)) => format!("Contractor {user_id}"),
            _ => String::new(),
        }
    }
}

/// A contractor's bid against a specific tender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Offer {
    /// Server-assigned identifier, 0 when unsaved.
    pub id: i64,
    /// The tender this offer bids on.
    pub tender_offer_id: i64,
    /// The contractor who placed the offer.
    pub user_id: Option<i64>,
    /// The offered price.
    pub price_offer: Decimal,
    /// When the offer was placed.
    #[serde(with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
    /// Snapshot of the tender for display purposes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tender_offer: Option<TenderOffer>,
}

impl Offer {
    /// Creates an unsaved offer on the given tender.
    #[must_use]
    pub const fn draft(tender_offer_id: i64, price_offer: Decimal) -> Self {
        Self {
            id: 0,
            tender_offer_id,
            user_id: None,
            price_offer,
            date: None,
            tender_offer: None,
        }
    }

    /// Returns the price band of the embedded tender snapshot, if any.
    #[must_use]
    pub fn price_band(&self) -> Option<PriceBand> {
        self.tender_offer.as_ref().map(TenderOffer::price_band)
    }
}
