//! `comparePassword` in three calling conventions over one comparison.
//!
//! A [`Verifier`] is resolved once when the plugin is applied and holds only the field path and
//! the hasher. Binding it to a document yields a short-lived handle that reads that document's
//! stored hash at call time.

use crate::document::{Document, FieldPath};
use crate::errors::PasswordError;
use crate::password::config::CompareStyle;
use crate::password::hasher::PasswordHasher;
use std::sync::Arc;
use zeroize::Zeroizing;

struct CompareCore {
    field: FieldPath,
    hasher: Arc<dyn PasswordHasher>,
}

impl CompareCore {
    fn stored_hash<'a>(&self, doc: &'a Document) -> Result<&'a str, PasswordError> {
        doc.get_str(self.field.as_str())
    }

    fn compare(&self, candidate: &str, hash: &str) -> Result<bool, PasswordError> {
        self.hasher.compare(candidate, hash)
    }
}

#[derive(Clone)]
pub enum Verifier {
    Blocking(SyncVerifier),
    Callback(CallbackVerifier),
    Future(FutureVerifier),
}

impl Verifier {
    #[must_use]
    pub fn new(style: CompareStyle, field: FieldPath, hasher: Arc<dyn PasswordHasher>) -> Self {
        let core = Arc::new(CompareCore { field, hasher });
        match style {
            CompareStyle::Blocking => Self::Blocking(SyncVerifier { core }),
            CompareStyle::Callback => Self::Callback(CallbackVerifier { core }),
            CompareStyle::Future => Self::Future(FutureVerifier { core }),
        }
    }

    #[must_use]
    pub const fn style(&self) -> CompareStyle {
        match self {
            Self::Blocking(_) => CompareStyle::Blocking,
            Self::Callback(_) => CompareStyle::Callback,
            Self::Future(_) => CompareStyle::Future,
        }
    }

    #[must_use]
    pub fn field(&self) -> &FieldPath {
        let core = match self {
            Self::Blocking(v) => &v.core,
            Self::Callback(v) => &v.core,
            Self::Future(v) => &v.core,
        };
        &core.field
    }

    #[must_use]
    pub const fn as_blocking(&self) -> Option<&SyncVerifier> {
        match self {
            Self::Blocking(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_callback(&self) -> Option<&CallbackVerifier> {
        match self {
            Self::Callback(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_future(&self) -> Option<&FutureVerifier> {
        match self {
            Self::Future(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("style", &self.style())
            .field("field", self.field())
            .finish_non_exhaustive()
    }
}

/// Compares on the calling thread.
#[derive(Clone)]
pub struct SyncVerifier {
    core: Arc<CompareCore>,
}

impl SyncVerifier {
    #[must_use]
    pub fn bind<'a>(&self, doc: &'a Document) -> BoundSync<'a> {
        BoundSync { core: Arc::clone(&self.core), doc }
    }
}

pub struct BoundSync<'a> {
    core: Arc<CompareCore>,
    doc: &'a Document,
}

impl BoundSync<'_> {
    /// # Errors
    /// The stored field is missing or not a string, or the stored hash cannot be parsed.
    pub fn compare_password(&self, candidate: &str) -> Result<bool, PasswordError> {
        let hash = self.core.stored_hash(self.doc)?;
        self.core.compare(candidate, hash)
    }
}

/// Compares off the calling thread and reports through a callback.
#[derive(Clone)]
pub struct CallbackVerifier {
    core: Arc<CompareCore>,
}

impl CallbackVerifier {
    #[must_use]
    pub fn bind<'a>(&self, doc: &'a Document) -> BoundCallback<'a> {
        BoundCallback { core: Arc::clone(&self.core), doc }
    }
}

pub struct BoundCallback<'a> {
    core: Arc<CompareCore>,
    doc: &'a Document,
}

impl BoundCallback<'_> {
    /// `on_done` runs at most once and never on the calling thread: on the tokio blocking pool
    /// when called inside a runtime, on a dedicated thread otherwise.
    ///
    /// A job queued on the blocking pool is dropped without running if the runtime shuts down
    /// before it starts; `on_done` is then never called. Outside that case it runs exactly once.
    pub fn compare_password<F>(&self, candidate: &str, on_done: F)
    where
        F: FnOnce(Result<bool, PasswordError>) + Send + 'static,
    {
        let core = Arc::clone(&self.core);
        let stored = self.core.stored_hash(self.doc).map(str::to_owned);
        let candidate = Zeroizing::new(candidate.to_owned());
        offload(move || {
            let result = stored.and_then(|hash| core.compare(&candidate, &hash));
            on_done(result);
        });
    }
}

/// Compares on the tokio blocking pool and resolves as a future.
#[derive(Clone)]
pub struct FutureVerifier {
    core: Arc<CompareCore>,
}

impl FutureVerifier {
    #[must_use]
    pub fn bind<'a>(&self, doc: &'a Document) -> BoundFuture<'a> {
        BoundFuture { core: Arc::clone(&self.core), doc }
    }
}

pub struct BoundFuture<'a> {
    core: Arc<CompareCore>,
    doc: &'a Document,
}

impl BoundFuture<'_> {
    /// Must be awaited inside a tokio runtime.
    ///
    /// # Errors
    /// Same failures as the blocking style, plus `Join` if the offloaded task is lost.
    pub async fn compare_password(&self, candidate: &str) -> Result<bool, PasswordError> {
        let hash = self.core.stored_hash(self.doc)?.to_owned();
        let core = Arc::clone(&self.core);
        let candidate = Zeroizing::new(candidate.to_owned());
        tokio::task::spawn_blocking(move || core.compare(&candidate, &hash)).await?
    }
}

fn offload<F>(job: F)
where
    F: FnOnce() + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => drop(handle.spawn_blocking(job)),
        Err(_) => drop(std::thread::spawn(job)),
    }
}
