// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;

/// Errors that can occur during domain validation.
///
/// Every variant is raised before a request leaves the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Tender title is empty.
    TitleRequired,
    /// Tender title exceeds the maximum length.
    TitleTooLong {
        /// The maximum number of characters allowed.
        max: usize,
        /// The number of characters supplied.
        actual: usize,
    },
    /// Tender description is empty.
    DescriptionRequired,
    /// Begin or end date is missing.
    DatesRequired,
    /// End date lies before the begin date.
    EndBeforeBegin {
        /// The begin date.
        begin: time::OffsetDateTime,
        /// The end date.
        end: time::OffsetDateTime,
    },
    /// A price bound is missing.
    PriceBoundRequired(&'static str),
    /// A price bound is negative.
    NegativePrice {
        /// The offending field.
        field: &'static str,
        /// The supplied value.
        value: Decimal,
    },
    /// The lower price bound exceeds the upper bound.
    MinGreaterThanMax {
        /// The lower bound.
        from_price: Decimal,
        /// The upper bound.
        to_price: Decimal,
    },
    /// An offer was submitted without a price.
    PriceRequired,
    /// An offer price lies outside the tender's price band.
    PriceOutOfRange {
        /// The offered price.
        price: Decimal,
        /// The smallest acceptable price.
        min: Decimal,
        /// The largest acceptable price, if bounded.
        max: Option<Decimal>,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleRequired => write!(f, "Title is required"),
            Self::TitleTooLong { max, actual } => {
                write!(f, "Title must be at most {max} characters, got {actual}")
            }
            Self::DescriptionRequired => write!(f, "Description is required"),
            Self::DatesRequired => write!(f, "Begin and end dates are required"),
            Self::EndBeforeBegin { begin, end } => {
                write!(f, "End date {end} cannot be before begin date {begin}")
            }
            Self::PriceBoundRequired(field) => write!(f, "{field} is required"),
            Self::NegativePrice { field, value } => {
                write!(f, "{field} cannot be negative, got {value}")
            }
            Self::MinGreaterThanMax {
                from_price,
                to_price,
            } => {
                write!(
                    f,
                    "Minimum price {from_price} cannot be greater than maximum price {to_price}"
                )
            }
            Self::PriceRequired => write!(f, "Offer price is required"),
            Self::PriceOutOfRange { price, min, max } => match max {
                Some(max) => write!(f, "Offer price {price} must be between {min} and {max}"),
                None => write!(f, "Offer price {price} must be at least {min}"),
            },
        }
    }
}

impl std::error::Error for DomainError {}
