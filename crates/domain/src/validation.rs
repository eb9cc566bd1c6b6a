// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{PriceBand, TITLE_MAX_CHARS, TenderDraft, TenderOffer};
use rust_decimal::Decimal;

/// Validates a complete tender before it is sent for create or update.
///
/// # Arguments
///
/// * `tender` - The tender to validate
///
/// # Errors
///
/// Returns an error if:
/// - The title is empty or longer than [`TITLE_MAX_CHARS`] characters
/// - The description is empty
/// - The end date lies before the begin date
/// - Either price bound is negative
/// - The lower price bound exceeds the upper bound
pub fn validate_tender_offer(tender: &TenderOffer) -> Result<(), DomainError> {
    // Rule: title is required and bounded in characters, not bytes
    if tender.title.trim().is_empty() {
        return Err(DomainError::TitleRequired);
    }
    let title_chars: usize = tender.title.chars().count();
    if title_chars > TITLE_MAX_CHARS {
        return Err(DomainError::TitleTooLong {
            max: TITLE_MAX_CHARS,
            actual: title_chars,
        });
    }

    // Rule: description is required
    if tender.description.trim().is_empty() {
        return Err(DomainError::DescriptionRequired);
    }

    // Rule: the window may be a single instant but never inverted
    if tender.end_date < tender.begin_date {
        return Err(DomainError::EndBeforeBegin {
            begin: tender.begin_date,
            end: tender.end_date,
        });
    }

    validate_price_bounds(tender.from_price, tender.to_price)
}

/// Validates an edit-form draft and turns it into a tender.
///
/// The resulting tender carries no report; reports are server-computed.
///
/// # Errors
///
/// Returns [`DomainError::DatesRequired`] if either date is missing,
/// [`DomainError::PriceBoundRequired`] if either price is missing, and any
/// error [`validate_tender_offer`] reports for the assembled tender.
pub fn validate_tender_draft(draft: TenderDraft) -> Result<TenderOffer, DomainError> {
    let (Some(begin_date), Some(end_date)) = (draft.begin_date, draft.end_date) else {
        return Err(DomainError::DatesRequired);
    };
    let from_price: Decimal = draft
        .from_price
        .ok_or(DomainError::PriceBoundRequired("Minimum price"))?;
    let to_price: Decimal = draft
        .to_price
        .ok_or(DomainError::PriceBoundRequired("Maximum price"))?;

    let tender: TenderOffer = TenderOffer {
        id: draft.id,
        title: draft.title,
        description: draft.description,
        begin_date,
        end_date,
        from_price,
        to_price,
        report: None,
    };
    validate_tender_offer(&tender)?;
    Ok(tender)
}

/// Validates the price a contractor offers.
///
/// With a known band the price must lie within it, bounds included. Without
/// one (the tender snapshot is missing) the price only has to be at least 1.
///
/// # Arguments
///
/// * `price` - The entered price, if any
/// * `band` - The tender's price band, if known
///
/// # Errors
///
/// Returns [`DomainError::PriceRequired`] when no price was entered and
/// [`DomainError::PriceOutOfRange`] when it falls outside the allowed range.
pub fn validate_offer_price(
    price: Option<Decimal>,
    band: Option<PriceBand>,
) -> Result<Decimal, DomainError> {
    let price: Decimal = price.ok_or(DomainError::PriceRequired)?;

    match band {
        Some(band) if !band.contains(price) => Err(DomainError::PriceOutOfRange {
            price,
            min: band.from_price,
            max: Some(band.to_price),
        }),
        Some(_) => Ok(price),
        None if price < Decimal::ONE => Err(DomainError::PriceOutOfRange {
            price,
            min: Decimal::ONE,
            max: None,
        }),
        None => Ok(price),
    }
}

fn validate_price_bounds(from_price: Decimal, to_price: Decimal) -> Result<(), DomainError> {
    if from_price < Decimal::ZERO {
        return Err(DomainError::NegativePrice {
            field: "Minimum price",
            value: from_price,
        });
    }
    if to_price < Decimal::ZERO {
        return Err(DomainError::NegativePrice {
            field: "Maximum price",
            value: to_price,
        });
    }
    if from_price > to_price {
        return Err(DomainError::MinGreaterThanMax {
            from_price,
            to_price,
        });
    }
    Ok(())
}
