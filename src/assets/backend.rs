//! Storage backends
//!
//! A backend physically produces resource instances for a resolved path. The
//! loader never caches on the backend's behalf, it only asks.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of resource instances of type `T`
pub trait StorageBackend<T> {
    /// Load the single instance stored at `path`
    fn load_one(&self, path: &str) -> Option<Arc<T>>;

    /// Load every instance of `T` stored at or below `path`.
    ///
    /// `path` is a directory-like prefix. An empty prefix means everything.
    fn load_all(&self, path: &str) -> Vec<Arc<T>>;
}

/// Check whether `path` lives at or below the directory-like `prefix`
#[must_use]
pub fn is_under(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }

    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Registered in-memory entry
struct MemoryEntry {
    path: String,
    value: Arc<dyn Any + Send + Sync>,
}

/// In-memory backend holding pre-built instances.
///
/// The same path may hold values of several types; lookups only see values of
/// the requested type. Enumeration follows registration order.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Vec<MemoryEntry>,
    /// Number of lookups served, hits and misses alike
    queries: AtomicUsize,
}

impl MemoryBackend {
    /// Create an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value at `path`
    pub fn insert<T: Send + Sync + 'static>(&mut self, path: impl Into<String>, value: T) -> &mut Self {
        self.insert_shared(path, Arc::new(value))
    }

    /// Register an already shared value at `path`
    pub fn insert_shared<T: Send + Sync + 'static>(
        &mut self,
        path: impl Into<String>,
        value: Arc<T>,
    ) -> &mut Self {
        self.entries.push(MemoryEntry {
            path: path.into(),
            value,
        });
        self
    }

    /// Number of registered values of any type
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of `load_one`/`load_all` calls served so far
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    fn typed<T: Send + Sync + 'static>(&self) -> impl Iterator<Item = (&str, Arc<T>)> + '_ {
        self.entries.iter().filter_map(|entry| {
            Arc::clone(&entry.value)
                .downcast::<T>()
                .ok()
                .map(|value| (entry.path.as_str(), value))
        })
    }
}

impl<T: Send + Sync + 'static> StorageBackend<T> for MemoryBackend {
    fn load_one(&self, path: &str) -> Option<Arc<T>> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.typed::<T>()
            .find(|(entry_path, _)| *entry_path == path)
            .map(|(_, value)| value)
    }

    fn load_all(&self, path: &str) -> Vec<Arc<T>> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.typed::<T>()
            .filter(|(entry_path, _)| is_under(entry_path, path))
            .map(|(_, value)| value)
            .collect()
    }
}
