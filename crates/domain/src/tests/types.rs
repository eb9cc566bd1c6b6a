// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_test_tender;
use crate::{Offer, OfferParticipant, TenderDraft, TenderOffer};
use rust_decimal_macros::dec;
use time::macros::datetime;

fn create_test_participant(user_id: Option<i64>, username: Option<&str>) -> OfferParticipant {
    OfferParticipant {
        offer_id: 3,
        user_id,
        username: username.map(String::from),
        price_offer: dec!(240),
        date: Some(datetime!(2024-01-06 10:30 UTC)),
    }
}

#[test]
fn test_tender_with_zero_id_is_new() {
    let mut tender: TenderOffer = create_test_tender();
    assert!(!tender.is_new());

    tender.id = 0;
    assert!(tender.is_new());
}

#[test]
fn test_tender_expiry_compares_end_date() {
    let tender: TenderOffer = create_test_tender();
    assert!(!tender.is_expired(datetime!(2024-01-10 16:59 UTC)));
    assert!(tender.is_expired(datetime!(2024-01-10 17:01 UTC)));
}

#[test]
fn test_draft_from_tender_copies_fields() {
    let tender: TenderOffer = create_test_tender();
    let draft: TenderDraft = TenderDraft::from_tender(&tender);

    assert_eq!(draft.id, 7);
    assert_eq!(draft.begin_date, Some(tender.begin_date));
    assert_eq!(draft.to_price, Some(dec!(500)));
}

#[test]
fn test_participant_display_name_prefers_username() {
    let participant = create_test_participant(Some(12), Some("Asphalt Co"));
    assert_eq!(participant.display_name(), "Asphalt Co");
}

#[test]
fn test_participant_display_name_falls_back_to_user_id() {
    let participant = create_test_participant(Some(12), None);
    assert_eq!(participant.display_name(), "Contractor 12");

    let blank = create_test_participant(Some(12), Some(" "));
    assert_eq!(blank.display_name(), "Contractor 12");
}

#[test]
fn test_participant_display_name_empty_when_anonymous() {
    let participant = create_test_participant(None, None);
    assert_eq!(participant.display_name(), "");
}

#[test]
fn test_offer_price_band_comes_from_snapshot() {
    let mut offer: Offer = Offer::draft(7, dec!(300));
    assert!(offer.price_band().is_none());

    offer.tender_offer = Some(create_test_tender());
    let band = offer.price_band().unwrap();
    assert_eq!(band.from_price, dec!(100));
    assert_eq!(band.to_price, dec!(500));
}

#[test]
fn test_tender_serializes_with_pascal_case_fields() {
    let json: serde_json::Value = serde_json::to_value(create_test_tender()).unwrap();

    assert_eq!(json["Id"], 7);
    assert_eq!(json["Title"], "Road resurfacing, district 4");
    assert_eq!(json["BeginDate"], "2024-01-05T08:00:00Z");
    assert_eq!(json["ToPrice"].as_f64(), Some(500.0));
    assert!(json.get("Report").is_none());
}

#[test]
fn test_offer_draft_serializes_without_snapshot() {
    let json: serde_json::Value = serde_json::to_value(Offer::draft(7, dec!(300))).unwrap();

    assert_eq!(json["Id"], 0);
    assert_eq!(json["TenderOfferId"], 7);
    assert_eq!(json["PriceOffer"].as_f64(), Some(300.0));
    assert!(json["Date"].is_null());
    assert!(json.get("TenderOffer").is_none());
}
