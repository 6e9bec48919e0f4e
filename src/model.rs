use crate::document::{Document, Metadata};
use crate::errors::PasswordError;
use crate::logger::AUDIT_TARGET;
use crate::password::{COMPARE_PASSWORD_METHOD, Verifier};
use crate::schema::Schema;
use crate::types::{DocumentId, ModelName};
use bson::Document as BsonDocument;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct StoredDocument {
    data: BsonDocument,
    metadata: Metadata,
}

/// A schema bound to an in-memory document store.
pub struct Model {
    name: ModelName,
    schema: Arc<Schema>,
    store: RwLock<HashMap<DocumentId, StoredDocument>>,
}

impl Model {
    #[must_use]
    pub fn new(name: impl Into<ModelName>, schema: Schema) -> Self {
        Self { name: name.into(), schema: Arc::new(schema), store: RwLock::new(HashMap::new()) }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    #[must_use]
    pub fn create(&self, data: BsonDocument) -> Document {
        Document::new(data)
    }

    /// Validates, runs pre-save hooks in order, then writes.
    ///
    /// Nothing is written if validation or any hook fails; the first error is returned. A hook
    /// failure rolls the document back to its state before the first hook ran, so earlier hooks'
    /// edits (a hashed password) are undone and the save can be retried.
    ///
    /// # Errors
    /// `Validation` or whatever a hook reports.
    pub fn save(&self, doc: &mut Document) -> Result<(), PasswordError> {
        self.schema.validate(doc)?;
        let snapshot = doc.clone();
        if let Err(e) = self.run_pre_save(doc) {
            *doc = snapshot;
            return Err(e);
        }
        let op = if doc.is_new() { "insert" } else { "update" };
        doc.mark_saved();
        let stored = StoredDocument { data: doc.data().clone(), metadata: doc.metadata.clone() };
        self.store.write().insert(doc.id.clone(), stored);
        log::info!(target: AUDIT_TARGET, "{op} {} {}", self.name, doc.id);
        Ok(())
    }

    fn run_pre_save(&self, doc: &mut Document) -> Result<(), PasswordError> {
        self.schema.pre_save_hooks().iter().try_for_each(|hook| hook.before_save(doc))
    }

    /// A clean copy of the stored document.
    #[must_use]
    pub fn find_by_id(&self, id: &DocumentId) -> Option<Document> {
        self.store
            .read()
            .get(id)
            .map(|s| Document::from_stored(id.clone(), s.data.clone(), s.metadata.clone()))
    }

    /// The raw persisted data, as the store holds it.
    #[must_use]
    pub fn stored_data(&self, id: &DocumentId) -> Option<BsonDocument> {
        self.store.read().get(id).map(|s| s.data.clone())
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.store.read().len()
    }

    #[must_use]
    pub fn method(&self, name: &str) -> Option<&Verifier> {
        self.schema.method(name)
    }

    /// The `comparePassword` method, when a password plugin is attached.
    #[must_use]
    pub fn compare_password(&self) -> Option<&Verifier> {
        self.method(COMPARE_PASSWORD_METHOD)
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .field("documents", &self.count())
            .finish()
    }
}
