use crate::document::FieldPath;
use crate::errors::PasswordError;
use crate::password::argon2_hasher::Argon2Hasher;
use crate::password::bcrypt_hasher::BcryptHasher;
use crate::password::hasher::PasswordHasher;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_COST: u32 = 10;
pub const DEFAULT_FIELD: &str = "password";

/// Options accepted by the password plugin, as written by callers.
///
/// Names are validated only when the plugin is applied to a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordOptions {
    #[serde(alias = "bcryptRounds")]
    pub hash_cost: u32,
    pub password_field: String,
    pub compare_password_type: String,
    pub hash_algorithm: String,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            hash_cost: DEFAULT_COST,
            password_field: DEFAULT_FIELD.to_string(),
            compare_password_type: CompareStyle::Callback.as_str().to_string(),
            hash_algorithm: HashAlgorithm::Bcrypt.as_str().to_string(),
        }
    }
}

impl PasswordOptions {
    /// Parse options from a JSON object; missing keys take their defaults.
    ///
    /// # Errors
    /// Returns `Json` on malformed input.
    pub fn from_json(json: &str) -> Result<Self, PasswordError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Calling convention of the attached `comparePassword` method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareStyle {
    Blocking,
    Callback,
    Future,
}

impl CompareStyle {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocking => "sync",
            Self::Callback => "callback",
            Self::Future => "future",
        }
    }
}

impl FromStr for CompareStyle {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sync" | "blocking" => Ok(Self::Blocking),
            "callback" => Ok(Self::Callback),
            "future" | "promise" => Ok(Self::Future),
            other => Err(PasswordError::UnsupportedCompareType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Bcrypt,
    Argon2,
}

impl HashAlgorithm {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bcrypt => "bcrypt",
            Self::Argon2 => "argon2",
        }
    }

    #[must_use]
    pub fn default_hasher(self) -> Arc<dyn PasswordHasher> {
        match self {
            Self::Bcrypt => Arc::new(BcryptHasher),
            Self::Argon2 => Arc::new(Argon2Hasher::new()),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bcrypt" => Ok(Self::Bcrypt),
            "argon2" | "argon2id" => Ok(Self::Argon2),
            other => Err(PasswordError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Options after validation. Immutable once a schema carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    pub field: FieldPath,
    pub cost: u32,
    pub style: CompareStyle,
    pub algorithm: HashAlgorithm,
}

impl PasswordConfig {
    /// The cost is not range-checked here; salt generation rejects it at save time.
    ///
    /// # Errors
    /// `UnsupportedCompareType`, `UnsupportedAlgorithm` or `InvalidFieldPath`.
    pub fn resolve(options: &PasswordOptions) -> Result<Self, PasswordError> {
        let style = options.compare_password_type.parse::<CompareStyle>()?;
        let algorithm = options.hash_algorithm.parse::<HashAlgorithm>()?;
        let field = FieldPath::parse(&options.password_field)?;
        Ok(Self { field, cost: options.hash_cost, style, algorithm })
    }
}

impl TryFrom<&PasswordOptions> for PasswordConfig {
    type Error = PasswordError;

    fn try_from(options: &PasswordOptions) -> Result<Self, Self::Error> {
        Self::resolve(options)
    }
}
