//! Baseline configuration values.
//!
//! # Design
//! - Timings match the panel CSS transitions and the host's typical round trip.
//! - Lock timeouts are the only recovery path for lost replies; keep them short.

/// Resource name used when the host page does not expose one.
pub const RESOURCE_NAME: &str = "space_economy";
/// Busy timeout for read-style admin requests, in milliseconds.
pub const REQUEST_LOCK_MS: u64 = 2_500;
/// Busy timeout for mutating submissions, in milliseconds.
pub const SUBMIT_LOCK_MS: u64 = 5_000;
/// Delay before focusing the first input of a freshly opened panel.
pub const FOCUS_SETTLE_MS: u64 = 40;
/// Duration of the overlay close transition.
pub const CLOSE_TRANSITION_MS: u64 = 250;
/// Delay before the tax issuance form reports the request as sent.
pub const ISSUE_FEEDBACK_MS: u64 = 450;
/// Delay before the payment success panel appears.
pub const PAYMENT_FEEDBACK_MS: u64 = 250;
/// Delay before the calculator re-enables its controls.
pub const CALCULATOR_UNLOCK_MS: u64 = 300;
/// Number of audit log entries requested per fetch.
pub const ADMIN_LOGS_LIMIT: u32 = 80;
