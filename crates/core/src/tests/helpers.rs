// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{MessageHandler, SameOriginBroadcaster, TenderEventMessage};
use std::sync::{Arc, Mutex};

/// Broadcaster that records outbound messages and lets tests inject inbound ones.
#[derive(Default)]
pub struct RecordingBroadcaster {
    sent: Mutex<Vec<TenderEventMessage>>,
    handler: Mutex<Option<MessageHandler>>,
}

impl RecordingBroadcaster {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<TenderEventMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn inject(&self, message: TenderEventMessage) {
        let handler = self.handler.lock().unwrap().clone().unwrap();
        handler(message);
    }
}

impl SameOriginBroadcaster for RecordingBroadcaster {
    fn send(&self, message: &TenderEventMessage) {
        self.sent.lock().unwrap().push(message.clone());
    }

    fn on_message(&self, handler: MessageHandler) {
        *self.handler.lock().unwrap() = Some(handler);
    }
}

/// Collects every value a subscriber is called with.
pub fn recorder<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync) {
    let seen: Arc<Mutex<Vec<T>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |value: &T| sink.lock().unwrap().push(value.clone()))
}
