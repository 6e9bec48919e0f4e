use crate::errors::PasswordError;
use crate::password::hasher::{PasswordHasher, Salt, random_salt_bytes};
use argon2::password_hash::{self, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

/// Argon2id hashing with PHC-string output; the cost is the time cost (passes).
#[derive(Debug, Clone, Copy)]
pub struct Argon2Hasher {
    m_cost_kib: u32,
    lanes: u32,
}

impl Argon2Hasher {
    #[must_use]
    pub const fn new() -> Self {
        Self { m_cost_kib: Params::DEFAULT_M_COST, lanes: Params::DEFAULT_P_COST }
    }

    /// Memory cost in KiB and parallelism used for new hashes.
    #[must_use]
    pub const fn with_memory(m_cost_kib: u32, lanes: u32) -> Self {
        Self { m_cost_kib, lanes }
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn gen_salt(&self, cost: u32) -> Result<Salt, PasswordError> {
        if cost < Params::MIN_T_COST {
            return Err(PasswordError::InvalidCost {
                cost,
                min: Params::MIN_T_COST,
                max: Params::MAX_T_COST,
            });
        }
        Ok(Salt::new(cost, random_salt_bytes()?))
    }

    fn hash(&self, plaintext: &str, salt: &Salt) -> Result<String, PasswordError> {
        let params = Params::new(self.m_cost_kib, salt.cost(), self.lanes, None)
            .map_err(|e| PasswordError::Hash(format!("argon2 params: {e}")))?;
        let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::encode_b64(salt.bytes())
            .map_err(|e| PasswordError::Hash(format!("argon2 salt: {e}")))?;
        argon
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::Hash(format!("argon2: {e}")))
    }

    fn compare(&self, candidate: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::Compare(e.to_string()))?;
        match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::Compare(e.to_string())),
        }
    }
}
