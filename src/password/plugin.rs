use crate::errors::PasswordError;
use crate::password::config::{PasswordConfig, PasswordOptions};
use crate::password::hasher::PasswordHasher;
use crate::password::hook::HashPasswordHook;
use crate::password::verifier::Verifier;
use crate::schema::{FieldDef, Plugin, Schema};
use std::sync::Arc;

pub const COMPARE_PASSWORD_METHOD: &str = "comparePassword";

/// Adds a hashed, required password field and a `comparePassword` method to a schema.
#[derive(Clone, Default)]
pub struct PasswordPlugin {
    options: PasswordOptions,
    hasher: Option<Arc<dyn PasswordHasher>>,
}

impl PasswordPlugin {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: PasswordOptions) -> Self {
        Self { options, hasher: None }
    }

    /// Overrides the hasher picked from `hashAlgorithm`.
    #[must_use]
    pub fn with_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    #[must_use]
    pub const fn options(&self) -> &PasswordOptions {
        &self.options
    }
}

impl Plugin for PasswordPlugin {
    fn apply(&self, schema: &mut Schema) -> Result<(), PasswordError> {
        let config = PasswordConfig::resolve(&self.options)?;
        let hasher = self.hasher.clone().unwrap_or_else(|| config.algorithm.default_hasher());
        schema.add_field(FieldDef::required_string(config.field.clone()));
        schema.pre_save(Arc::new(HashPasswordHook::new(
            config.field.clone(),
            config.cost,
            Arc::clone(&hasher),
        )));
        schema.add_method(
            COMPARE_PASSWORD_METHOD,
            Verifier::new(config.style, config.field.clone(), hasher),
        );
        log::debug!(
            "password plugin on {} (style {}, cost {})",
            config.field,
            config.style.as_str(),
            config.cost
        );
        Ok(())
    }
}
