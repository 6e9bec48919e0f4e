use crate::document::{Document, FieldPath};
use crate::errors::PasswordError;
use crate::password::Verifier;
use crate::schema::hooks::{Plugin, PreSaveHook};
use bson::Bson;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub path: FieldPath,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldDef {
    #[must_use]
    pub const fn required_string(path: FieldPath) -> Self {
        Self { path, kind: FieldKind::String, required: true }
    }

    fn check(&self, doc: &Document) -> Result<(), PasswordError> {
        match (doc.get(self.path.as_str()), self.kind) {
            (None | Some(Bson::Null), _) if self.required => {
                Err(PasswordError::Validation(format!("Path `{}` is required.", self.path)))
            }
            (None | Some(Bson::Null) | Some(Bson::String(_)), FieldKind::String) => Ok(()),
            (Some(_), FieldKind::String) => {
                Err(PasswordError::Validation(format!("Path `{}` must be a string.", self.path)))
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct Schema {
    fields: Vec<FieldDef>,
    pre_save: Vec<Arc<dyn PreSaveHook>>,
    methods: HashMap<String, Verifier>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field; a later declaration of the same path replaces the earlier one.
    pub fn add_field(&mut self, def: FieldDef) -> &mut Self {
        match self.fields.iter_mut().find(|f| f.path == def.path) {
            Some(existing) => *existing = def,
            None => self.fields.push(def),
        }
        self
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, path: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.path.as_str() == path)
    }

    /// Hooks run in registration order.
    pub fn pre_save(&mut self, hook: Arc<dyn PreSaveHook>) -> &mut Self {
        self.pre_save.push(hook);
        self
    }

    #[must_use]
    pub fn pre_save_hooks(&self) -> &[Arc<dyn PreSaveHook>] {
        &self.pre_save
    }

    pub fn add_method(&mut self, name: impl Into<String>, method: Verifier) -> &mut Self {
        self.methods.insert(name.into(), method);
        self
    }

    #[must_use]
    pub fn method(&self, name: &str) -> Option<&Verifier> {
        self.methods.get(name)
    }

    /// # Errors
    /// Whatever the plugin reports; configuration errors surface here, at setup.
    pub fn plugin<P: Plugin>(&mut self, plugin: &P) -> Result<&mut Self, PasswordError> {
        plugin.apply(self)?;
        Ok(self)
    }

    /// Checks declared fields against a document about to be saved.
    ///
    /// # Errors
    /// `Validation` naming the first offending path.
    pub fn validate(&self, doc: &Document) -> Result<(), PasswordError> {
        self.fields.iter().try_for_each(|f| f.check(doc))
    }
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hooks: Vec<&str> = self.pre_save.iter().map(|h| h.name()).collect();
        let mut methods: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        methods.sort_unstable();
        f.debug_struct("Schema")
            .field("fields", &self.fields)
            .field("pre_save", &hooks)
            .field("methods", &methods)
            .finish()
    }
}
