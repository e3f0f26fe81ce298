//! Bounded retry with exponential backoff
//!
//! Transfers and invalidation submissions share the same policy: a fixed
//! number of attempts, doubling the delay between them. A zero base delay
//! skips sleeping entirely so tests run at full speed.

use super::options::RetryPolicy;

/// Run `operation` up to `policy.attempts` times.
///
/// `on_retry` is called with the upcoming attempt number (2-based) before
/// each retry, after the backoff sleep.
pub fn with_retry<T, E, F, R>(policy: RetryPolicy, mut on_retry: R, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    R: FnMut(u32),
{
    let attempts = policy.attempts.max(1);
    let mut delay = policy.base_delay;

    for attempt in 1..=attempts {
        match operation() {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt == attempts {
                    return Err(err);
                }
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                    delay = delay.saturating_mul(2);
                }
                on_retry(attempt + 1);
            }
        }
    }

    unreachable!("retry loop returns on final attempt")
}
