//! Notification domain model.
//!
//! # Responsibility
//! - Define the transient message record queued by the mailbox.
//! - Map free-form category strings onto the severity taxonomy.
//!
//! # Invariants
//! - `id` is unique among currently queued notifications.
//! - An unrecognized category string degrades to `Severity::Info`, never to
//!   an error.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one queued notification.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NotificationId = Uuid;

/// Default display duration applied by [`publish`](crate::NotificationMailbox::publish).
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 4_000;

/// Severity category determining how a notification is styled and surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Positive outcome of an operation.
    Success,
    /// Failed operation the user should retry or report.
    Error,
    /// Neutral informational message.
    Info,
    /// Non-fatal condition worth the user's attention.
    Warning,
}

impl Severity {
    /// Stable string id used at serialization and configuration boundaries.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }

    /// Parses a category string, falling back to `Info` for anything
    /// unrecognized. Producers at string boundaries must never fail to
    /// publish because of a bad category.
    pub fn parse_or_info(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }
}

/// One transient user-visible message.
///
/// The mailbox exclusively owns queued notifications; producers and readers
/// hold nothing beyond the `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Generated at creation, never reused while the entry is queued.
    pub id: NotificationId,
    pub severity: Severity,
    /// Text shown to the user verbatim.
    pub body: String,
    /// Display duration in milliseconds. `0` means the entry persists until
    /// manually dismissed.
    pub duration_ms: u64,
}

impl Notification {
    /// Creates a notification with a freshly generated id.
    pub fn new(severity: Severity, body: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            severity,
            body: body.into(),
            duration_ms,
        }
    }
}
