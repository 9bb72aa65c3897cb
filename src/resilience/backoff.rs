//! Exponential backoff.

use std::time::Duration;

/// Delay to wait after failed attempt number `attempt` (1-based).
///
/// `base * 2^(attempt - 1)`, saturating, without jitter. `max` caps the
/// result when set.
pub fn calculate_backoff(attempt: u32, base: Duration, max: Option<Duration>) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let exponential_base = 2u32.saturating_pow(attempt - 1);
    let delay = base.saturating_mul(exponential_base);

    match max {
        Some(max) => delay.min(max),
        None => delay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_calculation() {
        let base = Duration::from_millis(1000);
        assert_eq!(calculate_backoff(0, base, None), Duration::ZERO);
        assert_eq!(calculate_backoff(1, base, None), Duration::from_millis(1000));
        assert_eq!(calculate_backoff(2, base, None), Duration::from_millis(2000));
        assert_eq!(calculate_backoff(3, base, None), Duration::from_millis(4000));
    }

    #[test]
    fn test_backoff_cap() {
        let base = Duration::from_millis(100);
        let max = Some(Duration::from_millis(1000));
        assert_eq!(calculate_backoff(4, base, max), Duration::from_millis(800));
        assert_eq!(calculate_backoff(10, base, max), Duration::from_millis(1000));
    }

    #[test]
    fn test_backoff_saturates() {
        let delay = calculate_backoff(200, Duration::from_secs(1), None);
        assert_eq!(delay, Duration::from_secs(u64::from(u32::MAX)));

        assert_eq!(calculate_backoff(3, Duration::MAX, None), Duration::MAX);
    }
}
