//! Wall-clock timing for sort calls.

use std::time::{Duration, Instant};

/// Run `f` and measure it with a monotonic clock.
///
/// The clock is sampled immediately before and after the call, so anything
/// the caller does outside `f` (such as building the dataset) is excluded.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let output = f();
    (output, start.elapsed())
}
