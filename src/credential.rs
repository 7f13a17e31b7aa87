//! Credential Guard: one-way hashing of login secrets and redaction of stored hashes.

use crate::config::ResourceConfig;
use crate::error::AppError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use serde_json::Value;

pub trait CredentialGuard: Send + Sync {
    /// Salted one-way hash of a raw credential.
    fn issue(&self, raw: &str) -> Result<String, AppError>;

    /// Constant-time check of a raw credential against a stored hash.
    fn verify(&self, raw: &str, stored: &str) -> bool;
}

/// Argon2id with a configurable time cost. Verification reads the parameters embedded in the stored hash,
/// so raising the cost does not invalidate existing credentials.
pub struct Argon2Guard {
    hasher: Argon2<'static>,
}

impl Argon2Guard {
    pub fn new(time_cost: u32) -> Result<Self, AppError> {
        let params = Params::new(Params::DEFAULT_M_COST, time_cost, Params::DEFAULT_P_COST, None)
            .map_err(|e| AppError::Credential(e.to_string()))?;
        Ok(Argon2Guard {
            hasher: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl CredentialGuard for Argon2Guard {
    fn issue(&self, raw: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        self.hasher
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Credential(e.to_string()))
    }

    fn verify(&self, raw: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => self.hasher.verify_password(raw.as_bytes(), &parsed).is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "stored credential is not a recognised hash");
                false
            }
        }
    }
}

/// Strip every sensitive column from a row before it leaves the service.
pub fn redact(resource: &ResourceConfig, mut row: Value) -> Value {
    if let Value::Object(map) = &mut row {
        for c in resource.sensitive_columns() {
            map.remove(&c.name);
        }
    }
    row
}
