use crate::document::{Document, FieldPath};
use crate::errors::PasswordError;
use crate::password::hasher::PasswordHasher;
use crate::schema::PreSaveHook;
use std::sync::Arc;
use zeroize::Zeroizing;

/// Replaces a modified plaintext password with a salted hash before the document is written.
///
/// On any error the field keeps its plaintext and the save must not proceed.
pub struct HashPasswordHook {
    field: FieldPath,
    cost: u32,
    hasher: Arc<dyn PasswordHasher>,
}

impl HashPasswordHook {
    #[must_use]
    pub fn new(field: FieldPath, cost: u32, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { field, cost, hasher }
    }

    #[must_use]
    pub const fn field(&self) -> &FieldPath {
        &self.field
    }

    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

impl PreSaveHook for HashPasswordHook {
    fn name(&self) -> &str {
        "hashPassword"
    }

    fn before_save(&self, doc: &mut Document) -> Result<(), PasswordError> {
        let path = self.field.as_str();
        if !doc.is_modified(path) {
            log::trace!("{path} unchanged on {}; skipping hash", doc.id);
            return Ok(());
        }
        let salt = self.hasher.gen_salt(self.cost)?;
        let plaintext = Zeroizing::new(doc.get_str(path)?.to_owned());
        let hashed = self.hasher.hash(&plaintext, &salt)?;
        doc.set_unmarked(path, hashed)?;
        log::debug!("hashed {path} on {} (cost {})", doc.id, self.cost);
        Ok(())
    }
}
