// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-process same-origin broadcast channel.
//!
//! A [`BroadcastBus`] plays the part of the browser's broadcast primitive
//! for hubs living in one process: every tab gets its own [`BusEndpoint`],
//! and a message sent by one endpoint reaches every other endpoint on the
//! same channel name.
//!
//! # Delivery
//!
//! - Messages are encoded to JSON on send and decoded on receipt, so only
//!   what survives serialization crosses the boundary
//! - An endpoint never delivers its own messages
//! - Endpoints on other channel names ignore the message
//! - Receivers that fall behind lose the oldest messages
//!
//! Queued messages are delivered either synchronously with
//! [`BusEndpoint::pump`] or by a background task started with
//! [`BusEndpoint::listen`].

use crate::broadcaster::{MessageHandler, SameOriginBroadcaster};
use crate::message::TenderEventMessage;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Maximum number of messages buffered per endpoint.
/// If an endpoint cannot keep up, older messages will be dropped.
const BUS_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
struct Envelope {
    channel: Arc<str>,
    origin: u64,
    payload: String,
}

/// Shared medium connecting the endpoints of one process.
#[derive(Clone)]
pub struct BroadcastBus {
    tx: broadcast::Sender<Envelope>,
    next_origin: Arc<AtomicU64>,
}

impl BroadcastBus {
    /// Creates a bus with no endpoints.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(BUS_CAPACITY);
        Self {
            tx,
            next_origin: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Opens a new endpoint on `channel`.
    ///
    /// The endpoint receives every message sent on `channel` from now on,
    /// except its own.
    #[must_use]
    pub fn endpoint(&self, channel: &str) -> Arc<BusEndpoint> {
        let origin: u64 = self.next_origin.fetch_add(1, Ordering::Relaxed);
        debug!(channel, origin, "Opened bus endpoint");
        Arc::new(BusEndpoint {
            channel: Arc::from(channel),
            origin,
            tx: self.tx.clone(),
            rx: tokio::sync::Mutex::new(self.tx.subscribe()),
            handler: Mutex::new(None),
        })
    }

    /// Returns the number of endpoints currently attached.
    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastBus {
    fn default() -> Self {
        Self::new()
    }
}

/// One tab's connection to a [`BroadcastBus`].
pub struct BusEndpoint {
    channel: Arc<str>,
    origin: u64,
    tx: broadcast::Sender<Envelope>,
    rx: tokio::sync::Mutex<broadcast::Receiver<Envelope>>,
    handler: Mutex<Option<MessageHandler>>,
}

impl BusEndpoint {
    /// Returns the channel name this endpoint is scoped to.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Delivers every queued message to the installed handler.
    ///
    /// Returns the number of messages handed to the handler. Returns 0
    /// without draining anything while a [`listen`](Self::listen) task owns
    /// the receiver.
    pub fn pump(&self) -> usize {
        let Ok(mut rx) = self.rx.try_lock() else {
            return 0;
        };

        let mut delivered: usize = 0;
        loop {
            match rx.try_recv() {
                Ok(envelope) => {
                    if self.deliver(envelope) {
                        delivered += 1;
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(
                        channel = %self.channel,
                        skipped,
                        "Bus endpoint lagged, messages dropped"
                    );
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        delivered
    }

    /// Spawns a task delivering messages as they arrive.
    ///
    /// Must be called from within a tokio runtime. The task runs until it
    /// is aborted through the returned handle.
    pub fn listen(self: &Arc<Self>) -> JoinHandle<()> {
        let endpoint: Arc<Self> = Arc::clone(self);
        tokio::spawn(async move {
            let mut rx = endpoint.rx.lock().await;
            loop {
                match rx.recv().await {
                    Ok(envelope) => {
                        endpoint.deliver(envelope);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(
                            channel = %endpoint.channel,
                            skipped,
                            "Bus endpoint lagged, messages dropped"
                        );
                    }
                    Err(RecvError::Closed) => {
                        debug!(channel = %endpoint.channel, "Bus closed");
                        break;
                    }
                }
            }
        })
    }

    fn deliver(&self, envelope: Envelope) -> bool {
        if envelope.origin == self.origin || envelope.channel != self.channel {
            return false;
        }

        let message: TenderEventMessage = match serde_json::from_str(&envelope.payload) {
            Ok(message) => message,
            Err(e) => {
                warn!(
                    ?e,
                    channel = %self.channel,
                    "Dropping malformed bus message"
                );
                return false;
            }
        };

        let handler: Option<MessageHandler> = self
            .handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match handler {
            Some(handler) => {
                handler(message);
                true
            }
            None => {
                debug!(
                    channel = %self.channel,
                    "No handler installed, message dropped"
                );
                false
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn send_raw(&self, payload: &str) {
        let _ = self.tx.send(Envelope {
            channel: Arc::clone(&self.channel),
            origin: self.origin,
            payload: payload.to_string(),
        });
    }
}

impl SameOriginBroadcaster for BusEndpoint {
    fn send(&self, message: &TenderEventMessage) {
        let payload: String = match serde_json::to_string(message) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(?e, "Failed to serialize tender event");
                return;
            }
        };

        let envelope: Envelope = Envelope {
            channel: Arc::clone(&self.channel),
            origin: self.origin,
            payload,
        };
        match self.tx.send(envelope) {
            Ok(receivers) => {
                debug!(?message, receivers, "Broadcast tender event");
            }
            Err(_) => {
                // No receivers, which is fine
                debug!(?message, "No receivers for tender event");
            }
        }
    }

    fn on_message(&self, handler: MessageHandler) {
        *self
            .handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(handler);
    }
}

impl std::fmt::Debug for BusEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusEndpoint")
            .field("channel", &self.channel)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}
