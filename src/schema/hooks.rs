use crate::document::Document;
use crate::errors::PasswordError;
use crate::schema::Schema;

/// Runs before a document is written. Returning `Err` aborts the write and the error reaches
/// the caller of `save`. Hooks may mutate the document in place.
pub trait PreSaveHook: Send + Sync {
    fn name(&self) -> &str {
        "anonymous"
    }

    /// # Errors
    /// Any error aborts the save.
    fn before_save(&self, doc: &mut Document) -> Result<(), PasswordError>;
}

impl<F> PreSaveHook for F
where
    F: Fn(&mut Document) -> Result<(), PasswordError> + Send + Sync,
{
    fn before_save(&self, doc: &mut Document) -> Result<(), PasswordError> {
        self(doc)
    }
}

/// A reusable bundle of schema changes, applied once at setup.
pub trait Plugin {
    /// # Errors
    /// Configuration errors; the schema must be left unchanged when one is returned.
    fn apply(&self, schema: &mut Schema) -> Result<(), PasswordError>;
}
