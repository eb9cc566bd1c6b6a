// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use tenderboard_domain::TenderCounts;

/// Name of the same-origin channel tender events travel on.
pub const TENDER_EVENTS_CHANNEL: &str = "tender-events";

/// Payload exchanged between hubs in different tabs.
///
/// Serialized with a `type` discriminator:
/// `{"type":"tender-created","title":"..."}` or
/// `{"type":"tender-counts","counts":{"total":..,"open":..,"expired":..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TenderEventMessage {
    /// A tender was created in another tab.
    TenderCreated {
        /// Title of the created tender, if it had one.
        #[serde(default)]
        title: Option<String>,
    },
    /// Another tab recomputed the tender counts.
    TenderCounts {
        /// The normalized counts.
        counts: TenderCounts,
    },
}
