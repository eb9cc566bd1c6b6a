// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reactive value cells with ordered change notification.
//!
//! A [`Signal`] owns a value and a list of subscribers. Every write stores
//! the value and queues a notification under the same lock, so the queue
//! always holds changes in write order. Whichever thread finds the queue
//! idle drains it, calling each subscriber in subscription order with no
//! internal lock held. A subscriber may therefore read the signal, set it
//! again or set another one.
//!
//! # Delivery
//!
//! - Without contention, `set` returns after every subscriber has run
//! - Under contention, a writer may return while another thread delivers its
//!   change; subscribers still observe changes strictly in write order
//! - A new subscriber first receives the value current at subscription and
//!   then every later change, never an older one

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

enum Pending<T> {
    Changed(T),
    Joined {
        id: u64,
        callback: Callback<T>,
        value: T,
    },
}

impl<T> Pending<T> {
    const fn is_join_of(&self, id: u64) -> bool {
        matches!(self, Self::Joined { id: joined, .. } if *joined == id)
    }
}

struct Queue<T> {
    pending: VecDeque<Pending<T>>,
    delivering: bool,
}

struct Shared<T> {
    value: RwLock<T>,
    subscribers: Mutex<Vec<(u64, Callback<T>)>>,
    queue: Mutex<Queue<T>>,
    next_id: AtomicU64,
}

impl<T: Clone> Shared<T> {
    fn subscribers(&self) -> MutexGuard<'_, Vec<(u64, Callback<T>)>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn queue(&self) -> MutexGuard<'_, Queue<T>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enqueue(&self, pending: Pending<T>) {
        self.queue().pending.push_back(pending);
    }

    fn detach(&self, id: u64) {
        // A join is moved from the queue to the subscriber list under the
        // queue lock, so one of the two still holds it
        let mut queue = self.queue();
        queue.pending.retain(|pending| !pending.is_join_of(id));
        drop(queue);
        self.subscribers().retain(|(existing, _)| *existing != id);
    }

    /// Delivers queued changes unless another thread already is.
    fn drain(&self) {
        {
            let mut queue = self.queue();
            if queue.delivering {
                return;
            }
            queue.delivering = true;
        }
        let _delivering: Delivering<'_, T> = Delivering { shared: self };

        while let Some((value, callbacks)) = self.next_delivery() {
            for callback in callbacks {
                callback(&value);
            }
        }
    }

    fn next_delivery(&self) -> Option<(T, Vec<Callback<T>>)> {
        let mut queue = self.queue();
        let Some(pending) = queue.pending.pop_front() else {
            // Cleared under the same lock a writer queues under, so no change
            // is left behind for a deliverer that already stopped
            queue.delivering = false;
            return None;
        };
        let delivery: (T, Vec<Callback<T>>) = match pending {
            Pending::Changed(value) => {
                let callbacks: Vec<Callback<T>> = self
                    .subscribers()
                    .iter()
                    .map(|(_, callback)| Arc::clone(callback))
                    .collect();
                (value, callbacks)
            }
            Pending::Joined {
                id,
                callback,
                value,
            } => {
                self.subscribers().push((id, Arc::clone(&callback)));
                (value, vec![callback])
            }
        };
        drop(queue);
        Some(delivery)
    }
}

/// Hands the queue back if a subscriber panics mid-delivery.
struct Delivering<'a, T: Clone> {
    shared: &'a Shared<T>,
}

impl<T: Clone> Drop for Delivering<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.shared.queue().delivering = false;
        }
    }
}

/// A writable reactive value.
pub struct Signal<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Clone + Send + Sync + 'static> Signal<T> {
    /// Creates a signal holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            shared: Arc::new(Shared {
                value: RwLock::new(value),
                subscribers: Mutex::new(Vec::new()),
                queue: Mutex::new(Queue {
                    pending: VecDeque::new(),
                    delivering: false,
                }),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Returns a copy of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        read_value(&self.shared)
    }

    /// Replaces the value and notifies every subscriber.
    pub fn set(&self, value: T) {
        self.write(value);
        self.deliver();
    }

    /// Derives the next value from the current one, stores it and notifies.
    ///
    /// The read and the write happen under one lock, so concurrent updates
    /// are never lost. Returns the stored value.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> T {
        let next: T = self.write_with(f);
        self.deliver();
        next
    }

    /// Returns a read-only view sharing this signal's value and subscribers.
    #[must_use]
    pub fn read_only(&self) -> ReadSignal<T> {
        ReadSignal {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Subscribes to changes. See [`ReadSignal::subscribe`].
    pub fn subscribe(&self, f: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        subscribe(&self.shared, f)
    }

    /// Stores `value` and queues its notification without delivering it.
    ///
    /// Callers writing several signals as one step do so under their own
    /// lock and call [`deliver`](Self::deliver) on each afterwards.
    pub(crate) fn write(&self, value: T) {
        self.write_with(|_| value);
    }

    /// Like [`write`](Self::write), deriving the value from the current one.
    pub(crate) fn write_with(&self, f: impl FnOnce(&T) -> T) -> T {
        let mut current = self
            .shared
            .value
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let next: T = f(&current);
        current.clone_from(&next);
        self.shared.enqueue(Pending::Changed(next.clone()));
        drop(current);
        next
    }

    /// Delivers queued notifications.
    pub(crate) fn deliver(&self) {
        self.shared.drain();
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        debug_value(&self.shared, "Signal", f)
    }
}

/// A read-only view of a [`Signal`].
///
/// Cloning is cheap; every clone observes the same value.
pub struct ReadSignal<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Clone + Send + Sync + 'static> ReadSignal<T> {
    /// Returns a copy of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        read_value(&self.shared)
    }

    /// Subscribes to changes.
    ///
    /// `f` is called once with the current value and then after every
    /// subsequent write. Unless another thread is delivering, or this is
    /// called from one of the signal's own subscribers, the first call
    /// happens before `subscribe` returns. The returned [`Subscription`]
    /// detaches `f` when dropped.
    pub fn subscribe(&self, f: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        subscribe(&self.shared, f)
    }
}

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ReadSignal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        debug_value(&self.shared, "ReadSignal", f)
    }
}

/// Handle to an active subscription.
///
/// Dropping the handle unsubscribes. Call [`Subscription::keep`] to leave the
/// subscriber attached for the lifetime of the signal.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Detaches the subscriber now.
    pub fn unsubscribe(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }

    /// Keeps the subscriber attached after this handle is gone.
    pub fn keep(mut self) {
        self.detach = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

fn read_value<T: Clone>(shared: &Shared<T>) -> T {
    shared
        .value
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn subscribe<T: Clone + Send + Sync + 'static>(
    shared: &Arc<Shared<T>>,
    f: impl Fn(&T) + Send + Sync + 'static,
) -> Subscription {
    let id: u64 = shared.next_id.fetch_add(1, Ordering::Relaxed);
    let callback: Callback<T> = Arc::new(f);

    {
        // Holding the value lock orders the join against concurrent writes
        let value = shared.value.read().unwrap_or_else(PoisonError::into_inner);
        shared.enqueue(Pending::Joined {
            id,
            callback,
            value: value.clone(),
        });
    }
    shared.drain();

    let weak: Weak<Shared<T>> = Arc::downgrade(shared);
    Subscription {
        detach: Some(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.detach(id);
            }
        })),
    }
}

fn debug_value<T: std::fmt::Debug>(
    shared: &Shared<T>,
    name: &str,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    let value = shared.value.read().unwrap_or_else(PoisonError::into_inner);
    f.debug_tuple(name).field(&*value).finish()
}
