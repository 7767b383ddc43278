//! Resource handle implementation
//!
//! Handles share one loaded instance between every caller that resolved it.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A shared handle to a loaded resource of type `T`.
///
/// Two handles are equal when they point at the same instance, so a cache hit
/// can be told apart from a fresh load.
#[derive(Debug)]
pub struct ResourceHandle<T> {
    inner: Arc<T>,
}

impl<T> ResourceHandle<T> {
    /// Create a new handle wrapping the given value
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Wrap an instance already shared by a storage backend
    #[must_use]
    pub fn from_arc(inner: Arc<T>) -> Self {
        Self { inner }
    }

    /// Get a reference to the underlying resource
    #[must_use]
    pub fn get(&self) -> &T {
        &self.inner
    }

    /// Check whether two handles refer to the same instance
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for ResourceHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> Eq for ResourceHandle<T> {}

impl<T> Hash for ResourceHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}

impl<T> std::ops::Deref for ResourceHandle<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
