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

mod counts;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use counts::TenderCounts;
pub use error::DomainError;
pub use types::{
    Offer, OfferParticipant, OffersReport, PriceBand, TITLE_MAX_CHARS, TenderDraft, TenderOffer,
};
pub use validation::{validate_offer_price, validate_tender_draft, validate_tender_offer};
