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

mod broadcaster;
mod bus;
mod hub;
mod message;
mod signal;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use broadcaster::{MessageHandler, NoopBroadcaster, SameOriginBroadcaster};
pub use bus::{BroadcastBus, BusEndpoint};
pub use hub::TenderHub;
pub use message::{TENDER_EVENTS_CHANNEL, TenderEventMessage};
pub use signal::{ReadSignal, Signal, Subscription};
pub use tenderboard_domain::TenderCounts;
