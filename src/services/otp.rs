use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

const OTP_VALIDITY_MINS: i64 = 10;

#[derive(Debug, Clone)]
struct OtpRecord {
    code: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpVerifyError {
    /// Never issued, already consumed, or already purged after expiry.
    NotFound,
    /// Past its validity window; the record is purged as a side effect.
    Expired,
    /// Wrong code; the record is kept so the caller may retry before expiry.
    Mismatch,
}

/// In-memory store of pending registration codes, keyed by email address.
///
/// Managed as Rocket state so it lives for the process and is shared by
/// concurrent requests. At most one outstanding code exists per email;
/// issuing again overwrites the previous record.
pub struct OtpStore {
    records: RwLock<HashMap<String, OtpRecord>>,
}

impl OtpStore {
    pub fn new() -> Self {
        OtpStore {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Generate a 6-digit code. Leading zeros are preserved, so the code is
    /// always exactly six characters wide.
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        format_code(rng.gen_range(0..1_000_000))
    }

    /// Store a fresh code for the email, replacing any outstanding one.
    pub fn put(&self, email: &str, code: &str) {
        self.put_at(email, code, Utc::now());
    }

    /// Drop any outstanding code for the email. Used to roll back an issuance
    /// whose delivery failed, so a retried request starts clean.
    pub fn remove(&self, email: &str) {
        self.records.write().unwrap().remove(email);
    }

    pub fn verify(&self, email: &str, submitted: &str) -> Result<(), OtpVerifyError> {
        self.verify_at(email, submitted, Utc::now())
    }

    fn put_at(&self, email: &str, code: &str, now: DateTime<Utc>) {
        let record = OtpRecord {
            code: code.to_string(),
            expires_at: now + Duration::minutes(OTP_VALIDITY_MINS),
        };
        self.records.write().unwrap().insert(email.to_string(), record);
    }

    // Check-then-delete happens under a single write lock so two racing
    // verifications cannot both consume the same code.
    fn verify_at(&self, email: &str, submitted: &str, now: DateTime<Utc>) -> Result<(), OtpVerifyError> {
        let mut records = self.records.write().unwrap();

        let record = records.get(email).ok_or(OtpVerifyError::NotFound)?;

        if now >= record.expires_at {
            records.remove(email);
            return Err(OtpVerifyError::Expired);
        }

        if record.code != submitted {
            return Err(OtpVerifyError::Mismatch);
        }

        records.remove(email);
        Ok(())
    }
}

fn format_code(value: u32) -> String {
    format!("{:06}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: &str = "seeker@example.com";

    fn now() -> DateTime<Utc> {
        "2026-08-05T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn verify_without_issue_is_not_found() {
        let store = OtpStore::new();
        assert_eq!(store.verify_at(EMAIL, "123456", now()), Err(OtpVerifyError::NotFound));
    }

    #[test]
    fn code_is_single_use() {
        let store = OtpStore::new();
        store.put_at(EMAIL, "123456", now());

        assert_eq!(store.verify_at(EMAIL, "123456", now() + Duration::minutes(1)), Ok(()));
        assert_eq!(
            store.verify_at(EMAIL, "123456", now() + Duration::minutes(1)),
            Err(OtpVerifyError::NotFound)
        );
    }

    #[test]
    fn expired_code_is_purged() {
        let store = OtpStore::new();
        store.put_at(EMAIL, "123456", now());

        assert_eq!(
            store.verify_at(EMAIL, "123456", now() + Duration::minutes(10)),
            Err(OtpVerifyError::Expired)
        );
        // The record was purged, so even the right code is now unknown.
        assert_eq!(
            store.verify_at(EMAIL, "123456", now() + Duration::minutes(10)),
            Err(OtpVerifyError::NotFound)
        );
    }

    #[test]
    fn code_is_valid_just_before_expiry() {
        let store = OtpStore::new();
        store.put_at(EMAIL, "123456", now());

        assert_eq!(
            store.verify_at(EMAIL, "123456", now() + Duration::minutes(10) - Duration::seconds(1)),
            Ok(())
        );
    }

    #[test]
    fn mismatch_keeps_the_record() {
        let store = OtpStore::new();
        store.put_at(EMAIL, "123456", now());

        assert_eq!(
            store.verify_at(EMAIL, "654321", now() + Duration::minutes(1)),
            Err(OtpVerifyError::Mismatch)
        );
        assert_eq!(store.verify_at(EMAIL, "123456", now() + Duration::minutes(2)), Ok(()));
    }

    #[test]
    fn reissue_supersedes_previous_code() {
        let store = OtpStore::new();
        store.put_at(EMAIL, "111111", now());
        store.put_at(EMAIL, "222222", now() + Duration::minutes(1));

        assert_eq!(
            store.verify_at(EMAIL, "111111", now() + Duration::minutes(2)),
            Err(OtpVerifyError::Mismatch)
        );
        assert_eq!(store.verify_at(EMAIL, "222222", now() + Duration::minutes(2)), Ok(()));
    }

    #[test]
    fn rollback_removes_the_record() {
        let store = OtpStore::new();
        store.put_at(EMAIL, "123456", now());
        store.remove(EMAIL);

        assert_eq!(
            store.verify_at(EMAIL, "123456", now() + Duration::minutes(1)),
            Err(OtpVerifyError::NotFound)
        );
    }

    #[test]
    fn stores_are_independent_per_email() {
        let store = OtpStore::new();
        store.put_at("a@example.com", "111111", now());
        store.put_at("b@example.com", "222222", now());

        assert_eq!(store.verify_at("a@example.com", "111111", now() + Duration::minutes(1)), Ok(()));
        assert_eq!(store.verify_at("b@example.com", "222222", now() + Duration::minutes(1)), Ok(()));
    }

    #[test]
    fn codes_are_fixed_width() {
        assert_eq!(format_code(42), "000042");
        assert_eq!(format_code(0), "000000");
        assert_eq!(format_code(999_999), "999999");
    }

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..200 {
            let code = OtpStore::generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
