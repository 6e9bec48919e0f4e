use crate::document::path::{get_path, get_str_path, paths_overlap, set_path};
use crate::document::types::Metadata;
use crate::errors::PasswordError;
use crate::types::{DocumentId, SerializableDateTime};
use bson::{Bson, Document as BsonDocument};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    data: BsonDocument,
    pub metadata: Metadata,
    #[serde(skip)]
    modified: BTreeSet<String>,
    #[serde(skip)]
    is_new: bool,
}

impl Document {
    /// A fresh, unsaved document. Every top-level key counts as modified.
    #[must_use]
    pub fn new(data: BsonDocument) -> Self {
        let modified = data.keys().cloned().collect();
        Self { id: DocumentId::new(), data, metadata: Metadata::new(), modified, is_new: true }
    }

    /// A document as loaded from a store: nothing modified.
    #[must_use]
    pub fn from_stored(id: DocumentId, data: BsonDocument, metadata: Metadata) -> Self {
        Self { id, data, metadata, modified: BTreeSet::new(), is_new: false }
    }

    /// Read-only view of the fields; writes go through [`Document::set`] so they are tracked.
    #[must_use]
    pub const fn data(&self) -> &BsonDocument {
        &self.data
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Bson> {
        get_path(&self.data, path)
    }

    /// # Errors
    /// `MissingField` or `FieldNotString`.
    pub fn get_str(&self, path: &str) -> Result<&str, PasswordError> {
        get_str_path(&self.data, path)
    }

    /// Assigns a value and marks the path modified.
    ///
    /// # Errors
    /// `PathConflict` when an intermediate segment is not a document.
    pub fn set(&mut self, path: &str, value: impl Into<Bson>) -> Result<(), PasswordError> {
        set_path(&mut self.data, path, value.into())?;
        self.modified.insert(path.to_string());
        Ok(())
    }

    /// Writes a value without touching the modified set (used by save hooks).
    ///
    /// # Errors
    /// `PathConflict` when an intermediate segment is not a document.
    pub(crate) fn set_unmarked(
        &mut self,
        path: &str,
        value: impl Into<Bson>,
    ) -> Result<(), PasswordError> {
        set_path(&mut self.data, path, value.into())?;
        Ok(())
    }

    /// True when `path`, one of its ancestors, or one of its descendants changed since load.
    #[must_use]
    pub fn is_modified(&self, path: &str) -> bool {
        self.modified.iter().any(|m| paths_overlap(m, path))
    }

    pub fn modified_paths(&self) -> impl Iterator<Item = &str> {
        self.modified.iter().map(String::as_str)
    }

    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.is_new
    }

    /// Clears change tracking after a successful write.
    pub fn mark_saved(&mut self) {
        self.modified.clear();
        self.is_new = false;
        self.metadata.updated_at = SerializableDateTime::now();
    }
}
