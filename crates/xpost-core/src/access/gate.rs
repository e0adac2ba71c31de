//! ============================================================================
//! Access Gate - Shared-secret password check
//! ============================================================================
//! The configured password is never compared directly. Both sides are run
//! through HMAC-SHA256 under a per-process random key and the tags are
//! compared with `Mac::verify_slice`, which is constant time and does not
//! depend on the candidate's length.
//! ============================================================================

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{info, warn};

use crate::error::{Result, XpostError};
use crate::types::Session;

type HmacSha256 = Hmac<Sha256>;

/// Gate guarding every protected action behind one shared password
pub struct AccessGate {
    key: [u8; 32],
    expected_tag: Vec<u8>,
}

impl AccessGate {
    /// Create a gate for the given shared secret
    pub fn new(password: &str) -> Result<Self> {
        if password.is_empty() {
            return Err(XpostError::Config("APP_PASSWORD must not be empty".to_string()));
        }

        let key: [u8; 32] = rand::random();
        let expected_tag = Self::tag(&key, password)?;

        Ok(Self { key, expected_tag })
    }

    fn mac(key: &[u8], candidate: &str) -> Result<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(key)
            .map_err(|e| XpostError::Config(format!("HMAC init failed: {}", e)))?;
        mac.update(candidate.as_bytes());
        Ok(mac)
    }

    fn tag(key: &[u8], candidate: &str) -> Result<Vec<u8>> {
        Ok(Self::mac(key, candidate)?.finalize().into_bytes().to_vec())
    }

    /// Check a password without touching any session
    pub fn verify(&self, candidate: &str) -> bool {
        match Self::mac(&self.key, candidate) {
            Ok(mac) => mac.verify_slice(&self.expected_tag).is_ok(),
            Err(_) => false,
        }
    }

    /// locked -> unlocked on a match; any mismatch leaves the session locked
    pub fn unlock(&self, session: &mut Session, candidate: &str) -> Result<()> {
        if self.verify(candidate) {
            session.set_authenticated(true);
            info!("Session unlocked");
            Ok(())
        } else {
            session.set_authenticated(false);
            warn!("Rejected password attempt");
            Err(XpostError::AccessDenied)
        }
    }

    /// Logout: always back to locked
    pub fn lock(&self, session: &mut Session) {
        session.set_authenticated(false);
        info!("Session locked");
    }

    /// Fail unless the session has passed the gate
    pub fn require(session: &Session) -> Result<()> {
        if session.is_authenticated() {
            Ok(())
        } else {
            Err(XpostError::AccessDenied)
        }
    }
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password_rejected_at_startup() {
        assert!(matches!(AccessGate::new(""), Err(XpostError::Config(_))));
    }

    #[test]
    fn test_correct_password_unlocks() {
        let gate = AccessGate::new("hunter2").unwrap();
        let mut session = Session::new();

        gate.unlock(&mut session, "hunter2").unwrap();
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_wrong_passwords_stay_locked_with_generic_message() {
        let gate = AccessGate::new("hunter2").unwrap();

        for candidate in ["", "h", "hunter", "hunter22", "Hunter2", "xxxxxxx", "hunter2 "] {
            let mut session = Session::new();
            let err = gate.unlock(&mut session, candidate).unwrap_err();
            assert_eq!(err, XpostError::AccessDenied);
            assert_eq!(err.to_string(), "Incorrect password");
            assert!(!session.is_authenticated());
        }
    }

    #[test]
    fn test_failed_attempt_relocks_session() {
        let gate = AccessGate::new("hunter2").unwrap();
        let mut session = Session::new();

        gate.unlock(&mut session, "hunter2").unwrap();
        assert!(gate.unlock(&mut session, "nope").is_err());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_lock_always_locks() {
        let gate = AccessGate::new("hunter2").unwrap();

        let mut session = Session::new();
        gate.lock(&mut session);
        assert!(!session.is_authenticated());

        gate.unlock(&mut session, "hunter2").unwrap();
        gate.lock(&mut session);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_require() {
        let gate = AccessGate::new("pw").unwrap();
        let mut session = Session::new();
        assert_eq!(AccessGate::require(&session), Err(XpostError::AccessDenied));

        gate.unlock(&mut session, "pw").unwrap();
        assert!(AccessGate::require(&session).is_ok());
    }

    #[test]
    fn test_debug_hides_secret_material() {
        let gate = AccessGate::new("hunter2").unwrap();
        let debug = format!("{:?}", gate);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("key"));
    }
}
