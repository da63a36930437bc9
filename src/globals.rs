//! Global busy flag for in-flight catalog work
//!
//! The UI disables its affordances while a bulk load is running; commands
//! consult the same flag so a queued click cannot start overlapping work.

use std::sync::atomic::{AtomicBool, Ordering};

/// Flag indicating whether a catalog load is in flight
pub static BUSY_FLAG: AtomicBool = AtomicBool::new(false);

/// Check if catalog work is in flight
pub fn is_busy() -> bool {
    BUSY_FLAG.load(Ordering::SeqCst)
}

/// Set the busy flag
pub fn set_busy(value: bool) {
    BUSY_FLAG.store(value, Ordering::SeqCst)
}
