//! Interaction core for the EventFlow venue site.
//! This crate is the single source of truth for the notification-mailbox
//! and form-wizard invariants.

pub mod clock;
pub mod logging;
pub mod mailbox;
pub mod model;
pub mod prefs;
pub mod submit;
pub mod wizard;

pub use clock::{Clock, ManualClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use mailbox::{NotificationMailbox, SubscriberId};
pub use model::field::{flatten_payload, FieldValue, FieldValues};
pub use model::notification::{
    Notification, NotificationId, Severity, DEFAULT_NOTIFICATION_DURATION_MS,
};
pub use prefs::{
    initial_theme, toggle_theme, FilePreferenceStore, HostAppearance, PreferenceStore, PrefsError,
    SystemAppearance, Theme,
};
pub use submit::{
    ContactSubmitter, HttpContactSubmitter, SubmitConfig, SubmitError, DEFAULT_CONTACT_ENDPOINT,
    DEFAULT_SUBMIT_TIMEOUT_MS,
};
pub use wizard::schema::{FieldRule, FieldSpec, StepSchema, ValidationErrors};
pub use wizard::session::{
    WizardConfigError, WizardError, WizardSession, WizardState, SUBMIT_FAILURE_MESSAGE,
    SUBMIT_NOTIFICATION_DURATION_MS, SUBMIT_SUCCESS_MESSAGE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
