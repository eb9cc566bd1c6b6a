// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::message::TenderEventMessage;
use std::sync::Arc;

/// Callback invoked for every message received from another tab.
pub type MessageHandler = Arc<dyn Fn(TenderEventMessage) + Send + Sync>;

/// Capability to exchange messages with other tabs of the same origin.
///
/// Delivery is best effort: at most once, unordered across tabs, with no
/// acknowledgement. Implementations must never hand a tab its own messages.
pub trait SameOriginBroadcaster: Send + Sync {
    /// Sends `message` to every other tab. Failures are swallowed.
    fn send(&self, message: &TenderEventMessage);

    /// Installs the handler for inbound messages, replacing any previous one.
    fn on_message(&self, handler: MessageHandler);
}

/// Broadcaster for contexts without a cross-tab transport.
///
/// Sends are dropped and no message is ever received.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBroadcaster;

impl SameOriginBroadcaster for NoopBroadcaster {
    fn send(&self, _message: &TenderEventMessage) {}

    fn on_message(&self, _handler: MessageHandler) {}
}
