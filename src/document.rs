//! Documents with dot-path access and modified-path tracking.

mod core;
pub mod path;
mod types;

pub use self::core::Document;
pub use path::{FieldPath, get_path, get_str_path, set_path};
pub use types::Metadata;
