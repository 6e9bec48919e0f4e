//! Schema declarations: fields, pre-save hooks, methods and plugins.

mod core;
mod hooks;

pub use self::core::{FieldDef, FieldKind, Schema};
pub use hooks::{Plugin, PreSaveHook};
