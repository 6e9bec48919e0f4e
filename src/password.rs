//! Password credentials: hash on save, verify on demand.

pub mod argon2_hasher;
pub mod bcrypt_hasher;
pub mod config;
pub mod hasher;
pub mod hook;
pub mod plugin;
pub mod verifier;

pub use argon2_hasher::Argon2Hasher;
pub use bcrypt_hasher::BcryptHasher;
pub use config::{CompareStyle, HashAlgorithm, PasswordConfig, PasswordOptions};
pub use hasher::{PasswordHasher, Salt};
pub use hook::HashPasswordHook;
pub use plugin::{COMPARE_PASSWORD_METHOD, PasswordPlugin};
pub use verifier::{
    BoundCallback, BoundFuture, BoundSync, CallbackVerifier, FutureVerifier, SyncVerifier,
    Verifier,
};
