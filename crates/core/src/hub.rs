// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tender event and counts hub.
//!
//! One hub lives in each tab. It owns the latest [`TenderCounts`] snapshot
//! and the "tender created" event stream, exposes both as read-only
//! signals, and replicates local changes to other tabs through a
//! [`SameOriginBroadcaster`].
//!
//! # Invariants
//!
//! - Stored counts are always normalized (no negative field)
//! - The version counter starts at 0 and grows by exactly 1 per creation
//!   event, local or inbound; it never decreases
//! - Only locally originated changes are broadcast, so an inbound message is
//!   never echoed back
//! - A creation event stores its title and its version as one step, so
//!   creation observers always see the title that belongs to the version
//! - No operation fails; broadcasting is fire-and-forget

use crate::broadcaster::{MessageHandler, NoopBroadcaster, SameOriginBroadcaster};
use crate::message::TenderEventMessage;
use crate::signal::{ReadSignal, Signal, Subscription};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tenderboard_domain::TenderCounts;
use tracing::{debug, info};

/// Process-wide source of truth for tender counts and creation events.
pub struct TenderHub {
    counts: Signal<TenderCounts>,
    version: Signal<u64>,
    latest_title: Signal<Option<String>>,
    created: Signal<(u64, Option<String>)>,
    create_step: Mutex<()>,
    broadcaster: Arc<dyn SameOriginBroadcaster>,
}

impl TenderHub {
    /// Creates a hub replicating through `broadcaster`.
    ///
    /// The hub installs itself as the broadcaster's inbound handler.
    #[must_use]
    pub fn new(broadcaster: Arc<dyn SameOriginBroadcaster>) -> Arc<Self> {
        let hub: Arc<Self> = Arc::new(Self {
            counts: Signal::new(TenderCounts::ZERO),
            version: Signal::new(0),
            latest_title: Signal::new(None),
            created: Signal::new((0, None)),
            create_step: Mutex::new(()),
            broadcaster: Arc::clone(&broadcaster),
        });

        let weak: Weak<Self> = Arc::downgrade(&hub);
        let handler: MessageHandler = Arc::new(move |message| {
            if let Some(hub) = weak.upgrade() {
                hub.apply_inbound(message);
            }
        });
        broadcaster.on_message(handler);

        hub
    }

    /// Creates a hub without a cross-tab transport.
    #[must_use]
    pub fn local() -> Arc<Self> {
        Self::new(Arc::new(NoopBroadcaster))
    }

    /// The current counts snapshot.
    #[must_use]
    pub fn counts(&self) -> ReadSignal<TenderCounts> {
        self.counts.read_only()
    }

    /// The creation-event counter. 0 means no event has happened yet.
    #[must_use]
    pub fn version(&self) -> ReadSignal<u64> {
        self.version.read_only()
    }

    /// Title of the most recently created tender.
    #[must_use]
    pub fn latest_title(&self) -> ReadSignal<Option<String>> {
        self.latest_title.read_only()
    }

    /// Replaces the counts snapshot and broadcasts it.
    ///
    /// Negative fields are stored as 0.
    pub fn update_counts(&self, counts: TenderCounts) {
        self.apply_counts(counts, true);
    }

    /// Records that a tender was created and broadcasts the event.
    pub fn notify_tender_created(&self, title: Option<String>) {
        self.apply_tender_created(title, true);
    }

    /// Returns this tab to the logged-out state.
    ///
    /// Zeroes the counts through the regular update path, so other tabs
    /// receive the zero snapshot too. Other tabs are not logged out.
    pub fn reset_session(&self) {
        info!("Resetting tender counts for logout");
        self.update_counts(TenderCounts::ZERO);
    }

    /// Observes creation events.
    ///
    /// `f` receives the new version and the latest title for every version
    /// of 1 or above. The initial version 0 is never reported.
    pub fn on_tender_created(
        &self,
        f: impl Fn(u64, Option<&str>) + Send + Sync + 'static,
    ) -> Subscription {
        self.created.subscribe(move |(version, title)| {
            if *version == 0 {
                return;
            }
            f(*version, title.as_deref());
        })
    }

    fn apply_inbound(&self, message: TenderEventMessage) {
        debug!(?message, "Applying tender event from another tab");
        match message {
            TenderEventMessage::TenderCreated { title } => {
                self.apply_tender_created(title, false);
            }
            TenderEventMessage::TenderCounts { counts } => {
                self.apply_counts(counts, false);
            }
        }
    }

    fn apply_counts(&self, counts: TenderCounts, broadcast: bool) {
        let normalized: TenderCounts = counts.normalized();
        self.counts.set(normalized);

        if broadcast {
            let message = TenderEventMessage::TenderCounts { counts: normalized };
            self.broadcaster.send(&message);
        }
    }

    fn apply_tender_created(&self, title: Option<String>, broadcast: bool) {
        let version: u64 = {
            let _step = self
                .create_step
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            self.latest_title.write(title.clone());
            let version: u64 = self.version.write_with(|n| n.saturating_add(1));
            self.created.write((version, title.clone()));
            version
        };
        self.latest_title.deliver();
        self.version.deliver();
        self.created.deliver();
        debug!(version, ?title, "Tender created");

        if broadcast {
            self.broadcaster
                .send(&TenderEventMessage::TenderCreated { title });
        }
    }
}

impl std::fmt::Debug for TenderHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenderHub")
            .field("counts", &self.counts)
            .field("version", &self.version)
            .field("latest_title", &self.latest_title)
            .finish_non_exhaustive()
    }
}
