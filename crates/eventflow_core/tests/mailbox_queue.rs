use eventflow_core::{ManualClock, Notification, NotificationMailbox, Severity};
use std::cell::RefCell;
use std::rc::Rc;

type SnapshotLog = Rc<RefCell<Vec<Vec<Notification>>>>;

fn recording_subscriber(log: &SnapshotLog) -> impl FnMut(&[Notification]) + 'static {
    let log = Rc::clone(log);
    move |snapshot| log.borrow_mut().push(snapshot.to_vec())
}

fn bodies(snapshot: &[Notification]) -> Vec<&str> {
    snapshot
        .iter()
        .map(|notification| notification.body.as_str())
        .collect()
}

#[test]
fn snapshots_reflect_insertion_order() {
    let mut mailbox = NotificationMailbox::with_clock(ManualClock::new());
    let log: SnapshotLog = Rc::default();
    mailbox.subscribe(recording_subscriber(&log));

    mailbox.publish(Severity::Info, "first");
    mailbox.publish(Severity::Warning, "second");
    mailbox.publish(Severity::Success, "third");

    let last = log.borrow().last().cloned().expect("at least one delivery");
    assert_eq!(bodies(&last), vec!["first", "second", "third"]);
}

#[test]
fn subscriber_receives_current_snapshot_immediately() {
    let mut mailbox = NotificationMailbox::with_clock(ManualClock::new());
    mailbox.publish(Severity::Info, "already queued");
    mailbox.publish(Severity::Info, "also queued");

    let log: SnapshotLog = Rc::default();
    mailbox.subscribe(recording_subscriber(&log));

    let deliveries = log.borrow();
    assert_eq!(deliveries.len(), 1, "late subscriber gets one immediate delivery");
    assert_eq!(bodies(&deliveries[0]), vec!["already queued", "also queued"]);
}

#[test]
fn dismiss_removes_by_id_and_is_idempotent() {
    let mut mailbox = NotificationMailbox::with_clock(ManualClock::new());
    let keep = mailbox.publish(Severity::Info, "keep");
    let doomed = mailbox.publish(Severity::Info, "drop");

    let log: SnapshotLog = Rc::default();
    mailbox.subscribe(recording_subscriber(&log));
    let deliveries_before = log.borrow().len();

    mailbox.dismiss(doomed);
    assert_eq!(mailbox.len(), 1);
    assert_eq!(log.borrow().len(), deliveries_before + 1);

    // Second dismissal of the same id is a no-op: no change, no delivery.
    mailbox.dismiss(doomed);
    assert_eq!(mailbox.len(), 1);
    assert_eq!(log.borrow().len(), deliveries_before + 1);

    let snapshot = mailbox.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, keep);
}

#[test]
fn timed_notification_expires_without_explicit_dismiss() {
    let clock = ManualClock::new();
    let mut mailbox = NotificationMailbox::with_clock(clock.clone());
    let log: SnapshotLog = Rc::default();
    mailbox.subscribe(recording_subscriber(&log));

    mailbox.publish_with_duration(Severity::Success, "Saved", 1_000);
    assert_eq!(mailbox.len(), 1);

    clock.advance(999);
    assert_eq!(mailbox.len(), 1, "still live just before the deadline");

    clock.advance(1);
    assert!(mailbox.is_empty(), "past-deadline entries are never visible");

    let deliveries_before = log.borrow().len();
    mailbox.poll_expired();
    assert!(mailbox.snapshot().is_empty());
    assert_eq!(
        log.borrow().len(),
        deliveries_before + 1,
        "sweep notifies subscribers once"
    );
    assert!(log.borrow().last().expect("delivery").is_empty());
}

#[test]
fn zero_duration_notification_persists_until_dismissed() {
    let clock = ManualClock::new();
    let mut mailbox = NotificationMailbox::with_clock(clock.clone());

    let id = mailbox.publish_with_duration(Severity::Warning, "sticky", 0);
    clock.advance(1_000_000);
    mailbox.poll_expired();
    assert_eq!(mailbox.len(), 1);

    mailbox.dismiss(id);
    assert!(mailbox.is_empty());
}

#[test]
fn dismiss_after_expiry_is_a_no_op() {
    let clock = ManualClock::new();
    let mut mailbox = NotificationMailbox::with_clock(clock.clone());

    let id = mailbox.publish_with_duration(Severity::Info, "short lived", 500);
    clock.advance(500);
    mailbox.poll_expired();
    assert!(mailbox.is_empty());

    mailbox.dismiss(id);
    assert!(mailbox.is_empty());
}

#[test]
fn unsubscribe_stops_delivery_and_is_idempotent() {
    let mut mailbox = NotificationMailbox::with_clock(ManualClock::new());
    let log: SnapshotLog = Rc::default();
    let subscriber = mailbox.subscribe(recording_subscriber(&log));

    mailbox.publish(Severity::Info, "seen");
    let deliveries = log.borrow().len();

    mailbox.unsubscribe(subscriber);
    mailbox.unsubscribe(subscriber);

    mailbox.publish(Severity::Info, "unseen");
    assert_eq!(log.borrow().len(), deliveries, "no delivery after unsubscribe");
}

#[test]
fn multiple_subscribers_each_receive_every_change() {
    let mut mailbox = NotificationMailbox::with_clock(ManualClock::new());
    let first: SnapshotLog = Rc::default();
    let second: SnapshotLog = Rc::default();
    mailbox.subscribe(recording_subscriber(&first));
    mailbox.subscribe(recording_subscriber(&second));

    mailbox.publish(Severity::Info, "broadcast");

    assert_eq!(first.borrow().len(), 2, "immediate delivery plus publish");
    assert_eq!(second.borrow().len(), 2);
    assert_eq!(
        first.borrow().last().map(|snapshot| snapshot.len()),
        second.borrow().last().map(|snapshot| snapshot.len())
    );
}
