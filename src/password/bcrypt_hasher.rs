use crate::errors::PasswordError;
use crate::password::hasher::{PasswordHasher, Salt, random_salt_bytes};
use bcrypt::Version;

pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// bcrypt (`$2b$`) hashing; the cost is the log2 round count.
#[derive(Debug, Default, Clone, Copy)]
pub struct BcryptHasher;

impl PasswordHasher for BcryptHasher {
    fn gen_salt(&self, cost: u32) -> Result<Salt, PasswordError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost { cost, min: MIN_COST, max: MAX_COST });
        }
        Ok(Salt::new(cost, random_salt_bytes()?))
    }

    fn hash(&self, plaintext: &str, salt: &Salt) -> Result<String, PasswordError> {
        bcrypt::hash_with_salt(plaintext, salt.cost(), *salt.bytes())
            .map(|parts| parts.format_for_version(Version::TwoB))
            .map_err(|e| PasswordError::Hash(e.to_string()))
    }

    fn compare(&self, candidate: &str, hash: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(candidate, hash).map_err(|e| PasswordError::Compare(e.to_string()))
    }
}
