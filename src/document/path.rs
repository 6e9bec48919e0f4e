//! Dot-path addressing into nested bson documents, e.g. `auth.local.pwd`.

use crate::errors::PasswordError;
use bson::{Bson, Document as BsonDocument};
use std::fmt;

pub const MAX_PATH_DEPTH: usize = 32;
pub const MAX_PATH_LEN: usize = 1024;

/// A validated dot path: non-empty segments, bounded depth and length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    /// # Errors
    /// Returns `InvalidFieldPath` for empty paths, empty segments, or paths over the limits.
    pub fn parse(path: &str) -> Result<Self, PasswordError> {
        let invalid = path.is_empty()
            || path.len() > MAX_PATH_LEN
            || path.split('.').count() > MAX_PATH_DEPTH
            || path.split('.').any(str::is_empty);
        if invalid {
            return Err(PasswordError::InvalidFieldPath(path.to_string()));
        }
        Ok(Self(path.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// True when `other` names this path, one of its ancestors, or one of its descendants.
    #[must_use]
    pub fn overlaps(&self, other: &str) -> bool {
        paths_overlap(&self.0, other)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[must_use]
pub fn paths_overlap(a: &str, b: &str) -> bool {
    a == b
        || a.strip_prefix(b).is_some_and(|rest| rest.starts_with('.'))
        || b.strip_prefix(a).is_some_and(|rest| rest.starts_with('.'))
}

pub fn get_path<'a>(doc: &'a BsonDocument, path: &str) -> Option<&'a Bson> {
    let mut cur = doc;
    let mut parts = path.split('.').peekable();
    while let Some(part) = parts.next() {
        let v = cur.get(part)?;
        if parts.peek().is_none() {
            return Some(v);
        }
        match v {
            Bson::Document(d) => cur = d,
            _ => return None,
        }
    }
    None
}

/// Reads a string leaf; the error distinguishes an absent field from a non-string one.
///
/// # Errors
/// `MissingField` or `FieldNotString`.
pub fn get_str_path<'a>(doc: &'a BsonDocument, path: &str) -> Result<&'a str, PasswordError> {
    match get_path(doc, path) {
        Some(Bson::String(s)) => Ok(s.as_str()),
        Some(_) => Err(PasswordError::FieldNotString(path.to_string())),
        None => Err(PasswordError::MissingField(path.to_string())),
    }
}

/// Writes `value` at `path`, creating missing intermediate documents. Returns the previous leaf.
///
/// # Errors
/// `PathConflict` when an intermediate segment exists but is not a document.
pub fn set_path(
    doc: &mut BsonDocument,
    path: &str,
    value: Bson,
) -> Result<Option<Bson>, PasswordError> {
    let (parents, leaf) = match path.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    };
    let mut cur = doc;
    if let Some(parents) = parents {
        for part in parents.split('.') {
            if !cur.contains_key(part) {
                cur.insert(part, BsonDocument::new());
            }
            cur = match cur.get_mut(part) {
                Some(Bson::Document(d)) => d,
                _ => return Err(PasswordError::PathConflict(path.to_string())),
            };
        }
    }
    Ok(cur.insert(leaf, value))
}
