//! Resource cache
//!
//! Loaded handles are remembered per resource type and resolved path. Each
//! type gets its own partition behind its own lock, so clearing or filling the
//! cache for one type never touches another.

use std::any::{Any, TypeId};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;

use super::handle::ResourceHandle;

/// All cached entries for a single resource type
struct CachePartition<T> {
    /// Single-instance loads by path
    single: FxHashMap<String, ResourceHandle<T>>,
    /// Load-all results by path prefix
    all: FxHashMap<String, Arc<[ResourceHandle<T>]>>,
}

impl<T> Default for CachePartition<T> {
    fn default() -> Self {
        Self {
            single: FxHashMap::default(),
            all: FxHashMap::default(),
        }
    }
}

type SharedPartition<T> = Mutex<CachePartition<T>>;

/// Process-wide cache of loaded resources, partitioned by type.
///
/// Entries live until [`ResourceCache::clear`] (or the cache itself) drops them.
#[derive(Default)]
pub struct ResourceCache {
    /// Type-erased `SharedPartition<T>` for each resource type
    partitions: Mutex<FxHashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl ResourceCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the partition for a specific type
    fn partition<T: Send + Sync + 'static>(&self) -> Arc<SharedPartition<T>> {
        let mut partitions = lock(&self.partitions);
        let entry = partitions
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                Arc::new(SharedPartition::<T>::default()) as Arc<dyn Any + Send + Sync>
            });

        Arc::clone(entry)
            .downcast::<SharedPartition<T>>()
            .expect("Type mismatch in resource cache")
    }

    /// Partition for `T` if one was ever created
    fn existing_partition<T: Send + Sync + 'static>(&self) -> Option<Arc<SharedPartition<T>>> {
        let partitions = lock(&self.partitions);
        partitions
            .get(&TypeId::of::<T>())
            .map(|entry| {
                Arc::clone(entry)
                    .downcast::<SharedPartition<T>>()
                    .expect("Type mismatch in resource cache")
            })
    }

    /// Look up a single cached instance
    #[must_use]
    pub fn get<T: Send + Sync + 'static>(&self, path: &str) -> Option<ResourceHandle<T>> {
        let partition = self.existing_partition::<T>()?;
        let partition = lock(&partition);
        partition.single.get(path).cloned()
    }

    /// Look up a cached load-all result
    #[must_use]
    pub fn get_all<T: Send + Sync + 'static>(&self, path: &str) -> Option<Arc<[ResourceHandle<T>]>> {
        let partition = self.existing_partition::<T>()?;
        let partition = lock(&partition);
        partition.all.get(path).cloned()
    }

    /// Store a single instance.
    ///
    /// If another caller stored an instance for the same path first, that one
    /// is kept and returned instead.
    pub fn insert<T: Send + Sync + 'static>(
        &self,
        path: &str,
        handle: ResourceHandle<T>,
    ) -> ResourceHandle<T> {
        let partition = self.partition::<T>();
        let mut partition = lock(&partition);
        partition
            .single
            .entry(path.to_string())
            .or_insert(handle)
            .clone()
    }

    /// Store a load-all result, keeping any result stored first
    pub fn insert_all<T: Send + Sync + 'static>(
        &self,
        path: &str,
        handles: Vec<ResourceHandle<T>>,
    ) -> Arc<[ResourceHandle<T>]> {
        let partition = self.partition::<T>();
        let mut partition = lock(&partition);
        Arc::clone(
            partition
                .all
                .entry(path.to_string())
                .or_insert_with(|| handles.into()),
        )
    }

    /// Drop both the single and load-all entries for one path
    ///
    /// Returns true if anything was removed
    pub fn invalidate<T: Send + Sync + 'static>(&self, path: &str) -> bool {
        let Some(partition) = self.existing_partition::<T>() else {
            return false;
        };
        let mut partition = lock(&partition);
        let single = partition.single.remove(path).is_some();
        let all = partition.all.remove(path).is_some();
        single || all
    }

    /// Clear every entry for `T`
    pub fn clear<T: Send + Sync + 'static>(&self) {
        if let Some(partition) = self.existing_partition::<T>() {
            let mut partition = lock(&partition);
            partition.single.clear();
            partition.all.clear();
        }
    }

    /// Clear every partition
    pub fn clear_all(&self) {
        lock(&self.partitions).clear();
    }

    /// Number of cached entries (single and load-all) for `T`
    #[must_use]
    pub fn len<T: Send + Sync + 'static>(&self) -> usize {
        self.existing_partition::<T>().map_or(0, |partition| {
            let partition = lock(&partition);
            partition.single.len() + partition.all.len()
        })
    }

    /// Check whether nothing is cached for `T`
    #[must_use]
    pub fn is_empty<T: Send + Sync + 'static>(&self) -> bool {
        self.len::<T>() == 0
    }
}

/// Partitions are plain maps, so a panic mid-update cannot leave them torn
fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
