//! Multi-step form wizard.
//!
//! # Responsibility
//! - Gate forward progress on per-step validation (`schema`).
//! - Sequence steps and the submission handshake (`session`).
//!
//! # Invariants
//! - Each step's schema covers only that step's own fields; there is no
//!   cross-step validation.

pub mod schema;
pub mod session;
