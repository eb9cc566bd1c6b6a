// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::wire::{
    WireApiResponse, WireCounts, WireLoginResult, WireOffer, WirePageResult, WireTenderOffer,
    parse_wire_date,
};
use crate::{ApiError, ApiResponse, PageRequest, PageResult, Role, UserSession};
use rust_decimal_macros::dec;
use serde_json::json;
use tenderboard_domain::{Offer, TenderCounts, TenderOffer};
use time::OffsetDateTime;
use time::macros::datetime;

fn decode_tender_page(
    body: serde_json::Value,
) -> Result<ApiResponse<PageResult<TenderOffer>>, ApiError> {
    let request: PageRequest = PageRequest::new(1, 10);
    let envelope: WireApiResponse = serde_json::from_value(body).unwrap();
    envelope.into_response(|page: WirePageResult<WireTenderOffer>| {
        page.into_domain(&request, WireTenderOffer::into_domain)
    })
}

#[test]
fn test_parse_wire_date_accepts_rfc3339() {
    assert_eq!(
        parse_wire_date("2024-01-10T12:30:00+03:30"),
        Some(datetime!(2024-01-10 12:30 +03:30))
    );
}

#[test]
fn test_parse_wire_date_reads_offsetless_as_utc() {
    assert_eq!(
        parse_wire_date("2024-01-10T12:30:00"),
        Some(datetime!(2024-01-10 12:30 UTC))
    );
    assert_eq!(
        parse_wire_date("2024-01-10T12:30:00.1234567"),
        Some(datetime!(2024-01-10 12:30:00.1234567 UTC))
    );
}

#[test]
fn test_parse_wire_date_accepts_bare_date() {
    assert_eq!(
        parse_wire_date("2024-01-10"),
        Some(datetime!(2024-01-10 00:00 UTC))
    );
}

#[test]
fn test_parse_wire_date_rejects_garbage() {
    assert_eq!(parse_wire_date("next tuesday"), None);
}

#[test]
fn test_tender_fields_default_when_missing() {
    let wire: WireTenderOffer = serde_json::from_value(json!({ "Id": 3 })).unwrap();

    let tender: TenderOffer = wire.into_domain();

    assert_eq!(tender.id, 3);
    assert_eq!(tender.title, "");
    assert_eq!(tender.begin_date, OffsetDateTime::UNIX_EPOCH);
    assert_eq!(tender.from_price, dec!(0));
    assert_eq!(tender.report, None);
}

#[test]
fn test_tender_accepts_numeric_strings_and_nulls() {
    let wire: WireTenderOffer = serde_json::from_value(json!({
        "Id": 4,
        "Title": "Water pipes",
        "Description": null,
        "BeginDate": "2024-01-05T00:00:00",
        "EndDate": "2024-01-10T00:00:00Z",
        "FromPrice": "1500.50",
        "ToPrice": 2000,
        "Report": null
    }))
    .unwrap();

    let tender: TenderOffer = wire.into_domain();

    assert_eq!(tender.description, "");
    assert_eq!(tender.begin_date, datetime!(2024-01-05 00:00 UTC));
    assert_eq!(tender.from_price, dec!(1500.50));
    assert_eq!(tender.to_price, dec!(2000));
}

#[test]
fn test_report_participants_and_winner_are_rebuilt() {
    let wire: WireTenderOffer = serde_json::from_value(json!({
        "Id": 5,
        "Report": {
            "UsersCount": 2,
            "MinPriceOffer": 120.5,
            "Participants": [
                { "OfferId": 1, "UserId": 9, "PriceOffer": 120.5 },
                { "OfferId": 2, "UserName": "Bina Co", "PriceOffer": 300 }
            ],
            "Winner": { "OfferId": 1, "UserId": 9, "PriceOffer": 120.5 }
        }
    }))
    .unwrap();

    let report = wire.into_domain().report.unwrap();

    assert_eq!(report.users_count, Some(2));
    assert_eq!(report.min_price_offer, Some(dec!(120.5)));
    assert_eq!(report.participants.len(), 2);
    assert_eq!(report.participants[0].display_name(), "Contractor 9");
    assert_eq!(report.participants[1].display_name(), "Bina Co");
    assert_eq!(report.winner.unwrap().offer_id, 1);
}

#[test]
fn test_offer_takes_tender_id_from_snapshot() {
    let wire: WireOffer = serde_json::from_value(json!({
        "Id": 11,
        "PriceOffer": 250,
        "TenderOffer": { "Id": 7, "FromPrice": 100, "ToPrice": 500 }
    }))
    .unwrap();

    let offer: Offer = wire.into_domain();

    assert_eq!(offer.tender_offer_id, 7);
    assert_eq!(offer.price_offer, dec!(250));
    assert_eq!(offer.price_band().unwrap().to_price, dec!(500));
}

#[test]
fn test_page_envelope_is_decoded() {
    let response = decode_tender_page(json!({
        "IsSuccess": true,
        "Message": "",
        "StatusCode": 200,
        "Result": {
            "PageNumber": 1,
            "PageSize": 10,
            "PagesCount": 1,
            "RecordsCount": 2,
            "Records": [{ "Id": 2 }, { "Id": 1 }]
        }
    }))
    .unwrap();

    assert!(response.is_success);
    let page: PageResult<TenderOffer> = response.result.unwrap();
    assert_eq!(page.records_count, 2);
    assert_eq!(
        page.records.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![2, 1]
    );
}

#[test]
fn test_failed_envelope_ignores_result() {
    let response = decode_tender_page(json!({
        "IsSuccess": false,
        "Message": "X",
        "StatusCode": 400,
        "Result": { "Records": [{ "Id": 1 }] }
    }))
    .unwrap();

    assert!(!response.is_success);
    assert_eq!(response.message, "X");
    assert_eq!(response.result, None);
}

#[test]
fn test_missing_is_success_counts_as_failure() {
    let response = decode_tender_page(json!({ "Result": null })).unwrap();

    assert!(!response.is_success);
    assert_eq!(response.status_code, 0);
}

#[test]
fn test_malformed_payload_is_a_decode_error() {
    let result = decode_tender_page(json!({
        "IsSuccess": true,
        "Result": { "Records": "not a list" }
    }));

    assert!(matches!(result, Err(ApiError::Decode { .. })));
}

#[test]
fn test_page_fills_gaps_and_truncates_oversized_pages() {
    let request: PageRequest = PageRequest::new(2, 2);
    let wire: WirePageResult<WireTenderOffer> = serde_json::from_value(json!({
        "Records": [{ "Id": 3 }, { "Id": 4 }, { "Id": 5 }]
    }))
    .unwrap();

    let page: PageResult<TenderOffer> = wire.into_domain(&request, WireTenderOffer::into_domain);

    assert_eq!(page.page_number, 2);
    assert_eq!(page.page_size, 2);
    assert_eq!(page.records.len(), 2);
    assert_eq!(page.records_count, 2);
    assert_eq!(page.pages_count, 1);
}

#[test]
fn test_counts_total_derived_when_missing() {
    let wire: WireCounts = serde_json::from_value(json!({ "Open": 3, "Expired": 4 })).unwrap();

    assert_eq!(wire.into_domain(), TenderCounts::new(7, 3, 4));
}

#[test]
fn test_counts_keep_reported_values() {
    let wire: WireCounts =
        serde_json::from_value(json!({ "Total": -5, "Open": 3, "Expired": -1 })).unwrap();

    assert_eq!(wire.into_domain(), TenderCounts::new(-5, 3, -1));
}

#[test]
fn test_login_result_maps_known_roles() {
    let wire: WireLoginResult = serde_json::from_value(json!({
        "Token": "abc",
        "User": { "Id": 4, "Username": "sara", "Roles": ["Admin", "Auditor", "contractor"] }
    }))
    .unwrap();

    let session: UserSession = wire.into_domain();

    assert_eq!(session.token, "abc");
    assert_eq!(session.user_id, Some(4));
    assert_eq!(session.username, "sara");
    assert_eq!(session.roles, vec![Role::Admin, Role::Contractor]);
}
