// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text rendering of command results.

use std::fmt::Write;
use tenderboard_domain::{Offer, OfferParticipant, OffersReport, TenderCounts, TenderOffer};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub fn format_date(date: OffsetDateTime) -> String {
    date.format(&Rfc3339).unwrap_or_else(|_| date.to_string())
}

pub fn counts(counts: &TenderCounts) -> String {
    format!(
        "Total: {}  Open: {}  Expired: {}",
        counts.total, counts.open, counts.expired
    )
}

pub fn tender_line(tender: &TenderOffer) -> String {
    format!(
        "#{:<6} {:<40} {} .. {}  [{} - {}]",
        tender.id,
        tender.title,
        format_date(tender.begin_date),
        format_date(tender.end_date),
        tender.from_price,
        tender.to_price
    )
}

pub fn tender_detail(tender: &TenderOffer) -> String {
    let mut out: String = String::new();
    let _ = writeln!(out, "Tender #{}", tender.id);
    let _ = writeln!(out, "Title:       {}", tender.title);
    let _ = writeln!(out, "Description: {}", tender.description);
    let _ = writeln!(out, "Begins:      {}", format_date(tender.begin_date));
    let _ = writeln!(out, "Ends:        {}", format_date(tender.end_date));
    let (from, to) = (tender.from_price, tender.to_price);
    let _ = write!(out, "Price band:  {from} - {to}");
    if let Some(report) = &tender.report {
        let _ = write!(out, "\n{}", report_summary(report));
    }
    out
}

pub fn offer_line(offer: &Offer) -> String {
    let tender_title: &str = offer
        .tender_offer
        .as_ref()
        .map_or("", |tender| tender.title.as_str());
    format!(
        "#{:<6} tender #{:<6} {:<30} {}{}",
        offer.id,
        offer.tender_offer_id,
        tender_title,
        offer.price_offer,
        offer
            .date
            .map(|date| format!("  {}", format_date(date)))
            .unwrap_or_default()
    )
}

pub fn participant_line(participant: &OfferParticipant) -> String {
    format!(
        "#{:<6} {:<30} {}{}",
        participant.offer_id,
        participant.display_name(),
        participant.price_offer,
        participant
            .date
            .map(|date| format!("  {}", format_date(date)))
            .unwrap_or_default()
    )
}

pub fn report_summary(report: &OffersReport) -> String {
    let users: String = report
        .users_count
        .map_or_else(|| String::from("-"), |n| n.to_string());
    let min_price: String = report
        .min_price_offer
        .map_or_else(|| String::from("-"), |p| p.to_string());
    let winner: String = report
        .winner
        .as_ref()
        .map_or_else(|| String::from("-"), OfferParticipant::display_name);
    format!(
        "Participants: {users}  Lowest offer: {min_price}  Winner: {winner}"
    )
}

pub fn report(tender: Option<&TenderOffer>, report: &OffersReport) -> String {
    let mut out: String = String::new();
    if let Some(tender) = tender {
        let _ = writeln!(out, "Report for tender #{}: {}", tender.id, tender.title);
    }
    out.push_str(&report_summary(report));
    if report.participants.is_empty() {
        out.push_str("\nNo offers yet");
    }
    for participant in &report.participants {
        let _ = write!(out, "\n{}", participant_line(participant));
    }
    out
}

/// Renders a list with a pager footer.
pub fn list<T>(
    records: &[T],
    total: u64,
    page_number: u32,
    page_size: u32,
    line: impl Fn(&T) -> String,
) -> String {
    if records.is_empty() {
        return String::from("No records");
    }
    let mut out: String = records.iter().map(line).collect::<Vec<_>>().join("\n");
    let pages: u64 = total.div_ceil(u64::from(page_size.max(1)));
    let _ = write!(out, "\nPage {page_number} of {pages} ({total} records)");
    out
}
