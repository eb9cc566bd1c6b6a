// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{TenderDraft, TenderOffer};
use rust_decimal_macros::dec;
use time::macros::datetime;

pub fn create_test_tender() -> TenderOffer {
    TenderOffer {
        id: 7,
        title: String::from("Road resurfacing, district 4"),
        description: String::from("Resurface 2.3 km of asphalt"),
        begin_date: datetime!(2024-01-05 08:00 UTC),
        end_date: datetime!(2024-01-10 17:00 UTC),
        from_price: dec!(100),
        to_price: dec!(500),
        report: None,
    }
}

pub fn create_test_draft() -> TenderDraft {
    TenderDraft {
        id: 0,
        title: String::from("Park lighting"),
        description: String::from("Replace 40 street lamps"),
        begin_date: Some(datetime!(2024-01-05 00:00 UTC)),
        end_date: Some(datetime!(2024-01-10 00:00 UTC)),
        from_price: Some(dec!(100)),
        to_price: Some(dec!(500)),
    }
}
