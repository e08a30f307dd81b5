use time::{Duration, OffsetDateTime};

/// Failed logins tolerated before the account locks.
pub const MAX_FAILED_ATTEMPTS: i32 = 5;
/// How long a lock lasts once triggered.
pub const LOCKOUT_MINUTES: i64 = 15;

/// Derived lock state for a user at a given instant. The store only keeps
/// `(login_attempts, lock_until)`; whether the account is locked is always
/// computed against the clock, never persisted as a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutStatus {
    Unlocked,
    Locked { minutes_remaining: i64 },
}

pub fn status(lock_until: Option<OffsetDateTime>, now: OffsetDateTime) -> LockoutStatus {
    match lock_until {
        Some(until) if until > now => {
            let secs = (until - now).whole_seconds();
            LockoutStatus::Locked {
                // round up so "a few seconds left" reads as 1 minute
                minutes_remaining: (secs + 59) / 60,
            }
        }
        _ => LockoutStatus::Unlocked,
    }
}

/// Whether the next recorded failure crosses the attempt limit.
pub fn locks_after(attempts_before: i32) -> bool {
    attempts_before + 1 >= MAX_FAILED_ATTEMPTS
}

/// Deadline applied when a failure triggers the lock.
pub fn lock_deadline(now: OffsetDateTime) -> OffsetDateTime {
    now + Duration::minutes(LOCKOUT_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    #[test]
    fn no_deadline_means_unlocked() {
        assert_eq!(status(None, now()), LockoutStatus::Unlocked);
    }

    #[test]
    fn elapsed_deadline_means_unlocked() {
        let t = now();
        assert_eq!(status(Some(t - Duration::minutes(1)), t), LockoutStatus::Unlocked);
        // boundary: a deadline exactly at "now" is already elapsed
        assert_eq!(status(Some(t), t), LockoutStatus::Unlocked);
    }

    #[test]
    fn future_deadline_reports_remaining_minutes_rounded_up() {
        let t = now();
        assert_eq!(
            status(Some(t + Duration::minutes(15)), t),
            LockoutStatus::Locked { minutes_remaining: 15 }
        );
        assert_eq!(
            status(Some(t + Duration::seconds(61)), t),
            LockoutStatus::Locked { minutes_remaining: 2 }
        );
        assert_eq!(
            status(Some(t + Duration::seconds(5)), t),
            LockoutStatus::Locked { minutes_remaining: 1 }
        );
    }

    #[test]
    fn fifth_failure_triggers_the_lock() {
        // attempts persisted so far; the lock lands on the 5th failure
        assert!(!locks_after(0));
        assert!(!locks_after(3));
        assert!(locks_after(4));
        assert!(locks_after(7));
    }

    #[test]
    fn lock_deadline_is_fifteen_minutes_out() {
        let t = now();
        assert_eq!(lock_deadline(t) - t, Duration::minutes(LOCKOUT_MINUTES));
    }
}
