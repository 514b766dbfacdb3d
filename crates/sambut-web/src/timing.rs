//! Mapping page deadlines onto browser `setTimeout` delays.

use core::time::Duration;

/// Largest delay `setTimeout` honors. Longer waits fire early and re-arm.
pub const MAX_TIMEOUT_MS: i32 = i32::MAX;

/// Delay in whole milliseconds until `deadline`, measured from `elapsed`.
///
/// Rounds up so the timer never fires before the deadline; a deadline already
/// in the past yields 0.
#[must_use]
pub fn timeout_delay_ms(deadline: Duration, elapsed: Duration) -> i32 {
    let remaining = deadline.saturating_sub(elapsed);
    let ms = remaining.as_micros().div_ceil(1_000);
    i32::try_from(ms).unwrap_or(MAX_TIMEOUT_MS)
}
