//! Timestamp-based replay rejection.

use crate::error::EnvelopeError;

/// Default tolerated clock drift between client and server, in seconds.
pub const DEFAULT_WINDOW_SECS: i64 = 300;

/// Current server time as epoch seconds.
pub fn unix_now() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

/// Stateless freshness guard.
///
/// Rejects envelopes whose timestamp drifted more than the window from
/// server time. There is no nonce or signature cache: a captured
/// envelope replayed inside the window passes this check, so the guard
/// is a coarse time bound, not a single-use guarantee.
#[derive(Debug, Clone, Copy)]
pub struct ReplayGuard {
    window_secs: i64,
}

impl ReplayGuard {
    pub fn new(window_secs: i64) -> Self {
        Self { window_secs }
    }

    /// Accept iff `|now - ts| <= window`.
    pub fn check_freshness(&self, ts: i64, now: i64) -> Result<(), EnvelopeError> {
        if (now - ts).abs() <= self.window_secs {
            Ok(())
        } else {
            Err(EnvelopeError::ExpiredRequest)
        }
    }
}

impl Default for ReplayGuard {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn accepts_exact_window_boundaries() {
        let guard = ReplayGuard::default();
        assert!(guard.check_freshness(NOW - 300, NOW).is_ok());
        assert!(guard.check_freshness(NOW + 300, NOW).is_ok());
    }

    #[test]
    fn rejects_one_second_past_the_window() {
        let guard = ReplayGuard::default();
        assert!(matches!(
            guard.check_freshness(NOW - 301, NOW),
            Err(EnvelopeError::ExpiredRequest)
        ));
        assert!(matches!(
            guard.check_freshness(NOW + 301, NOW),
            Err(EnvelopeError::ExpiredRequest)
        ));
    }

    #[test]
    fn accepts_current_time() {
        let guard = ReplayGuard::default();
        assert!(guard.check_freshness(NOW, NOW).is_ok());
    }

    // The guard keeps no state, so an identical timestamp checked twice
    // is accepted twice: replay protection is only a time bound.
    #[test]
    fn replay_inside_window_is_accepted() {
        let guard = ReplayGuard::default();
        assert!(guard.check_freshness(NOW - 10, NOW).is_ok());
        assert!(guard.check_freshness(NOW - 10, NOW).is_ok());
    }

    #[test]
    fn respects_custom_window() {
        let guard = ReplayGuard::new(60);
        assert!(guard.check_freshness(NOW - 60, NOW).is_ok());
        assert!(guard.check_freshness(NOW - 61, NOW).is_err());
    }
}
