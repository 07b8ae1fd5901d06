//! Clock Port
//!
//! Source of the current instant for expiry decisions.

use std::time::Instant;

/// Monotonic time source.
///
/// Production code uses the system clock; tests substitute a clock they can
/// advance by hand.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}
