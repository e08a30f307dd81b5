use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::lockout::{self, LockoutStatus};

/// Login identity, linked 1:1 to an account by account number. The lockout
/// bookkeeping lives here; whether the user is locked is derived from
/// `lock_until` against the clock.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub account_number: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_verified: bool,
    pub last_login: Option<OffsetDateTime>,
    #[serde(skip_serializing)]
    pub login_attempts: i32,
    #[serde(skip_serializing)]
    pub lock_until: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl User {
    pub fn lockout_status(&self, now: OffsetDateTime) -> LockoutStatus {
        lockout::status(self.lock_until, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn user(lock_until: Option<OffsetDateTime>) -> User {
        User {
            id: Uuid::new_v4(),
            account_number: "1234567890".into(),
            email: "a@b.com".into(),
            password_hash: "$argon2id$secret".into(),
            is_verified: true,
            last_login: None,
            login_attempts: 0,
            lock_until,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn lockout_status_tracks_deadline() {
        let now = OffsetDateTime::now_utc();
        assert_eq!(user(None).lockout_status(now), LockoutStatus::Unlocked);
        assert_eq!(
            user(Some(now - Duration::minutes(1))).lockout_status(now),
            LockoutStatus::Unlocked
        );
        assert!(matches!(
            user(Some(now + Duration::minutes(10))).lockout_status(now),
            LockoutStatus::Locked { .. }
        ));
    }

    #[test]
    fn secrets_and_lock_state_stay_out_of_json() {
        let json = serde_json::to_string(&user(None)).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("login_attempts"));
        assert!(!json.contains("lock_until"));
    }
}
