//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `eventflow_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use eventflow_core::SubmitConfig;

fn main() {
    let config = SubmitConfig::default();
    println!("eventflow_core version={}", eventflow_core::core_version());
    println!("eventflow_core contact_endpoint={}", config.endpoint);
    println!("eventflow_core submit_timeout_ms={}", config.timeout_ms);
}
