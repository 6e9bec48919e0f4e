pub mod document;
pub mod errors;
pub mod logger;
pub mod model;
pub mod password;
pub mod schema;
pub mod types;

pub use document::{Document, FieldPath};
pub use errors::PasswordError;
pub use model::Model;
pub use password::{
    Argon2Hasher, BcryptHasher, COMPARE_PASSWORD_METHOD, CompareStyle, HashAlgorithm,
    PasswordHasher, PasswordOptions, PasswordPlugin, Verifier,
};
pub use schema::{FieldDef, Plugin, PreSaveHook, Schema};
pub use types::DocumentId;

/// Initializes process-level services.
///
/// Sets up the logger from `log4rs.yaml` when present.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    logger::init()?;
    Ok(())
}
