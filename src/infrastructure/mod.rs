//! Infrastructure Layer
//!
//! Cross-cutting concerns and infrastructure components.

pub mod clock;
pub mod shutdown;

pub use clock::{ManualClock, SystemClock};
pub use shutdown::shutdown_signal;
