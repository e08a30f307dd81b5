pub mod repo;
pub mod repo_types;

pub use repo_types::{Transaction, TransactionKind, TransactionStatus};

use rand::{distributions::Alphanumeric, Rng};
use time::OffsetDateTime;

/// Generate a `TXN`-prefixed reference: creation timestamp plus a short
/// random alphanumeric tail. Uniqueness is ultimately guarded by the DB
/// constraint on the column.
pub fn new_reference() -> String {
    let millis = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
    let tail: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|c| (c as char).to_ascii_uppercase())
        .collect();
    format!("TXN{millis}{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references_have_prefix_and_differ() {
        let a = new_reference();
        let b = new_reference();
        assert!(a.starts_with("TXN"));
        assert!(a.len() > 12);
        assert_ne!(a, b);
    }
}
