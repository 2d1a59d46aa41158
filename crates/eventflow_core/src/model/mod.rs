//! Domain model for the interaction core.
//!
//! # Responsibility
//! - Define the canonical notification and form-field shapes shared by the
//!   mailbox, the wizard and the submission boundary.
//!
//! # Invariants
//! - Every queued notification carries a stable `NotificationId`.
//! - Accumulated form values serialize to one flat JSON object.

pub mod field;
pub mod notification;
