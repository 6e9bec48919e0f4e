use crate::errors::PasswordError;
use std::fmt;

pub const SALT_LEN: usize = 16;

/// Random salt bytes plus the work factor they were generated for.
#[derive(Clone, PartialEq, Eq)]
pub struct Salt {
    cost: u32,
    bytes: [u8; SALT_LEN],
}

impl Salt {
    #[must_use]
    pub const fn new(cost: u32, bytes: [u8; SALT_LEN]) -> Self {
        Self { cost, bytes }
    }

    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    #[must_use]
    pub const fn bytes(&self) -> &[u8; SALT_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Salt").field("cost", &self.cost).finish_non_exhaustive()
    }
}

/// The hashing primitive behind the save hook and the verifiers.
///
/// Produced hashes must be self-describing: `compare` gets nothing but the candidate and the
/// stored string. A mismatch is `Ok(false)`; `Err` is reserved for structural failures.
pub trait PasswordHasher: Send + Sync {
    /// # Errors
    /// `InvalidCost` when `cost` is outside the algorithm's bounds, `Salt` on entropy failure.
    fn gen_salt(&self, cost: u32) -> Result<Salt, PasswordError>;

    /// # Errors
    /// `Hash` when the primitive rejects its input.
    fn hash(&self, plaintext: &str, salt: &Salt) -> Result<String, PasswordError>;

    /// # Errors
    /// `Compare` when `hash` cannot be parsed.
    fn compare(&self, candidate: &str, hash: &str) -> Result<bool, PasswordError>;
}

pub(crate) fn random_salt_bytes() -> Result<[u8; SALT_LEN], PasswordError> {
    let mut bytes = [0u8; SALT_LEN];
    getrandom::fill(&mut bytes).map_err(|e| PasswordError::Salt(e.to_string()))?;
    Ok(bytes)
}
