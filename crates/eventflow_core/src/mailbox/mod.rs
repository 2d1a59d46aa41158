//! Notification mailbox: the process-wide transient-message queue.
//!
//! # Responsibility
//! - Own the ordered notification queue and the subscriber set.
//! - Deliver an immutable snapshot to every subscriber after each change.
//! - Expire timed notifications against the injected clock.
//!
//! # Invariants
//! - Insertion order is display order; snapshots always reflect it.
//! - A snapshot is built only after a mutation completed, so no subscriber
//!   observes a torn queue.
//! - `dismiss` and `unsubscribe` are idempotent; a missed id is a no-op.
//! - Entries past their deadline are never visible in any snapshot, even
//!   before a sweep reclaims them.
//!
//! Expiry is modeled as a per-entry deadline swept by [`poll_expired`]
//! rather than a background timer, keeping the mailbox single-threaded and
//! deterministic. Manual dismissal drops the deadline together with the
//! entry, so the auto-expiry vs dismiss race resolves to a no-op either way.
//!
//! [`poll_expired`]: NotificationMailbox::poll_expired

use crate::clock::{Clock, SystemClock};
use crate::model::notification::{
    Notification, NotificationId, Severity, DEFAULT_NOTIFICATION_DURATION_MS,
};
use log::debug;

/// Handle identifying one registered subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(u64);

type SubscriberCallback = Box<dyn FnMut(&[Notification])>;

struct QueuedEntry {
    notification: Notification,
    /// Absolute deadline in clock milliseconds; `None` persists until
    /// manually dismissed.
    expires_at_ms: Option<u64>,
}

impl QueuedEntry {
    fn is_live(&self, now_ms: u64) -> bool {
        self.expires_at_ms.is_none_or(|deadline| now_ms < deadline)
    }
}

/// Queue and subscriber set for transient user-visible messages.
///
/// Constructed once and passed by reference to whatever boundary needs it;
/// single-writer discipline follows from the `&mut` receivers.
pub struct NotificationMailbox<C: Clock = SystemClock> {
    clock: C,
    queue: Vec<QueuedEntry>,
    subscribers: Vec<(SubscriberId, SubscriberCallback)>,
    next_subscriber_id: u64,
}

impl NotificationMailbox<SystemClock> {
    /// Creates a mailbox running against the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for NotificationMailbox<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> NotificationMailbox<C> {
    /// Creates a mailbox running against the provided time source.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            queue: Vec::new(),
            subscribers: Vec::new(),
            next_subscriber_id: 0,
        }
    }

    /// Publishes a message with the default display duration.
    pub fn publish(&mut self, severity: Severity, body: impl Into<String>) -> NotificationId {
        self.publish_with_duration(severity, body, DEFAULT_NOTIFICATION_DURATION_MS)
    }

    /// Publishes a message, appending it at the tail of the queue and
    /// notifying every subscriber with the updated snapshot.
    ///
    /// `duration_ms == 0` keeps the entry until it is dismissed by id.
    pub fn publish_with_duration(
        &mut self,
        severity: Severity,
        body: impl Into<String>,
        duration_ms: u64,
    ) -> NotificationId {
        self.sweep_expired();

        let notification = Notification::new(severity, body, duration_ms);
        let id = notification.id;
        let expires_at_ms = if duration_ms > 0 {
            Some(self.clock.now_ms().saturating_add(duration_ms))
        } else {
            None
        };

        debug!(
            "event=notification_published module=mailbox severity={} duration_ms={} queue_len={}",
            notification.severity.as_str(),
            duration_ms,
            self.queue.len() + 1
        );

        self.queue.push(QueuedEntry {
            notification,
            expires_at_ms,
        });
        self.notify_subscribers();
        id
    }

    /// Removes the notification with the matching id, if still queued.
    ///
    /// Dismissing an id that already expired or was already dismissed is a
    /// no-op; subscribers are notified only when the queue changed.
    pub fn dismiss(&mut self, id: NotificationId) {
        let expired = self.sweep_expired();
        let before = self.queue.len();
        self.queue.retain(|entry| entry.notification.id != id);
        let removed = self.queue.len() != before;

        if removed {
            debug!(
                "event=notification_dismissed module=mailbox queue_len={}",
                self.queue.len()
            );
        }
        if removed || expired {
            self.notify_subscribers();
        }
    }

    /// Registers a callback invoked with the queue snapshot on every change.
    ///
    /// The callback also fires immediately with the current snapshot, so a
    /// late subscriber does not miss already-queued messages.
    pub fn subscribe(&mut self, callback: impl FnMut(&[Notification]) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber_id);
        self.next_subscriber_id += 1;

        let mut callback: SubscriberCallback = Box::new(callback);
        callback(&self.snapshot());
        self.subscribers.push((id, callback));
        id
    }

    /// Removes a subscriber. Calling it again with the same handle is a
    /// safe no-op.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(candidate, _)| *candidate != id);
    }

    /// Reclaims entries whose deadline passed, notifying subscribers when
    /// anything was removed. Callers drive this from their event loop; the
    /// mailbox schedules no background work of its own.
    pub fn poll_expired(&mut self) {
        if self.sweep_expired() {
            self.notify_subscribers();
        }
    }

    /// Ordered copy of the live queue.
    pub fn snapshot(&self) -> Vec<Notification> {
        let now_ms = self.clock.now_ms();
        self.queue
            .iter()
            .filter(|entry| entry.is_live(now_ms))
            .map(|entry| entry.notification.clone())
            .collect()
    }

    /// Number of live notifications.
    pub fn len(&self) -> usize {
        let now_ms = self.clock.now_ms();
        self.queue.iter().filter(|entry| entry.is_live(now_ms)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sweep_expired(&mut self) -> bool {
        let now_ms = self.clock.now_ms();
        let before = self.queue.len();
        self.queue.retain(|entry| entry.is_live(now_ms));
        let swept = before - self.queue.len();
        if swept > 0 {
            debug!(
                "event=notifications_expired module=mailbox count={} queue_len={}",
                swept,
                self.queue.len()
            );
        }
        swept > 0
    }

    fn notify_subscribers(&mut self) {
        let snapshot = self.snapshot();
        for (_, callback) in &mut self.subscribers {
            callback(&snapshot);
        }
    }
}
