//! Cached resource loading
//!
//! [`ResourceLoader`] owns the cache, the storage backend and the diagnostic
//! sink. [`ResourceResolver`] is a typed view over it for a single resource
//! type.

use std::marker::PhantomData;
use std::sync::Arc;

use super::backend::StorageBackend;
use super::cache::ResourceCache;
use super::descriptor::{Resource, resolve_path};
use super::diagnostics::{DiagnosticSink, LogSink};
use super::handle::ResourceHandle;

/// Errors that can occur while resolving a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// Nothing of the requested type is stored at the resolved path
    NotFound {
        /// The resolved lookup path
        path: String,
    },
}

impl std::fmt::Display for ResourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "Failed to load resource at path: {path}"),
        }
    }
}

impl std::error::Error for ResourceError {}

/// Resource loading service shared by every call site
pub struct ResourceLoader<B> {
    backend: B,
    cache: ResourceCache,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl<B> ResourceLoader<B> {
    /// Create a loader that reports diagnostics through the `log` crate
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_diagnostics(backend, Arc::new(LogSink))
    }

    /// Create a loader with a custom diagnostic sink
    #[must_use]
    pub fn with_diagnostics(backend: B, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            backend,
            cache: ResourceCache::new(),
            diagnostics,
        }
    }

    /// Typed view for loading resources of type `T`
    #[must_use]
    pub fn resolver<T: Resource>(&self) -> ResourceResolver<'_, T, B>
    where
        B: StorageBackend<T>,
    {
        ResourceResolver {
            loader: self,
            _marker: PhantomData,
        }
    }

    /// Storage backend
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Shared cache
    #[must_use]
    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    /// Load a single resource, warning if it is missing
    pub fn load<T: Resource>(&self, path: Option<&str>) -> Option<ResourceHandle<T>>
    where
        B: StorageBackend<T>,
    {
        self.resolver::<T>().load(path)
    }

    /// Load a single resource without warning if it is missing
    pub fn try_load<T: Resource>(&self, path: Option<&str>) -> Option<ResourceHandle<T>>
    where
        B: StorageBackend<T>,
    {
        self.resolver::<T>().try_load(path)
    }

    /// Load every resource of type `T` under a path
    pub fn load_all<T: Resource>(&self, path: Option<&str>) -> Vec<ResourceHandle<T>>
    where
        B: StorageBackend<T>,
    {
        self.resolver::<T>().load_all(path)
    }

    /// Forget everything cached for `T`
    pub fn clear_cache<T: Resource>(&self) {
        log::debug!("Clearing resource cache for {}", T::type_identifier());
        self.cache.clear::<T>();
    }
}

/// Loads resources of one type through a [`ResourceLoader`]
pub struct ResourceResolver<'a, T, B> {
    loader: &'a ResourceLoader<B>,
    _marker: PhantomData<fn() -> T>,
}

impl<T, B> ResourceResolver<'_, T, B>
where
    T: Resource,
    B: StorageBackend<T>,
{
    /// The path this resolver would use for `explicit`
    #[must_use]
    pub fn path(&self, explicit: Option<&str>) -> String {
        resolve_path::<T>(explicit)
    }

    /// Resolve and load a single instance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the backend has no instance of
    /// `T` at the resolved path
    pub fn fetch(&self, explicit: Option<&str>) -> Result<ResourceHandle<T>, ResourceError> {
        let path = self.path(explicit);
        let cache = &self.loader.cache;

        if let Some(handle) = cache.get::<T>(&path) {
            return Ok(handle);
        }

        match self.loader.backend.load_one(&path) {
            Some(value) => {
                log::debug!("Loaded {} from '{path}'", T::type_identifier());
                Ok(cache.insert(&path, ResourceHandle::from_arc(value)))
            }
            None => Err(ResourceError::NotFound { path }),
        }
    }

    /// Load a single instance.
    ///
    /// A missing resource is reported through the diagnostic sink and yields
    /// `None`.
    pub fn load(&self, explicit: Option<&str>) -> Option<ResourceHandle<T>> {
        match self.fetch(explicit) {
            Ok(handle) => Some(handle),
            Err(e) => {
                self.loader
                    .diagnostics
                    .warn(&format!("[ResourceLoader::Load] {e}"));
                None
            }
        }
    }

    /// Load a single instance, treating absence as an expected outcome
    pub fn try_load(&self, explicit: Option<&str>) -> Option<ResourceHandle<T>> {
        self.fetch(explicit).ok()
    }

    /// Load every instance of `T` at or below the resolved path.
    ///
    /// An empty result is not an error. Like any other result it stays cached
    /// until [`ResourceResolver::clear_cache`].
    pub fn load_all(&self, explicit: Option<&str>) -> Vec<ResourceHandle<T>> {
        let path = self.path(explicit);
        let cache = &self.loader.cache;

        if let Some(handles) = cache.get_all::<T>(&path) {
            return handles.to_vec();
        }

        let handles: Vec<ResourceHandle<T>> = self
            .loader
            .backend
            .load_all(&path)
            .into_iter()
            .map(ResourceHandle::from_arc)
            .collect();

        log::debug!(
            "Loaded {} {} resource(s) under '{path}'",
            handles.len(),
            T::type_identifier()
        );
        cache.insert_all(&path, handles).to_vec()
    }

    /// Like [`ResourceResolver::load_all`], but `None` when nothing matched
    pub fn try_load_all(&self, explicit: Option<&str>) -> Option<Vec<ResourceHandle<T>>> {
        let handles = self.load_all(explicit);
        (!handles.is_empty()).then_some(handles)
    }

    /// Forget everything cached for `T`
    pub fn clear_cache(&self) {
        self.loader.clear_cache::<T>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{MemoryBackend, RecordingSink, ResourceDescriptor};

    #[derive(Debug)]
    struct CreatedTestConfig {
        test_string: String,
    }

    impl Resource for CreatedTestConfig {
        const DESCRIPTOR: Option<ResourceDescriptor> =
            Some(ResourceDescriptor::named("CreatedTestConfig").in_category("Configs"));
    }

    #[derive(Debug)]
    struct NotCreatedTestConfig;

    impl Resource for NotCreatedTestConfig {
        const DESCRIPTOR: Option<ResourceDescriptor> =
            Some(ResourceDescriptor::named("NotCreatedTestConfig").in_category("Configs"));
    }

    #[derive(Debug)]
    enum ConfigAsset {
        Created(String),
        Another(String),
    }

    impl Resource for ConfigAsset {}

    fn loader() -> (ResourceLoader<MemoryBackend>, Arc<RecordingSink>) {
        let mut backend = MemoryBackend::new();
        backend
            .insert(
                "Configs/CreatedTestConfig",
                CreatedTestConfig {
                    test_string: "TestString".to_string(),
                },
            )
            .insert(
                "Configs/CreatedTestConfig",
                ConfigAsset::Created("TestString".to_string()),
            )
            .insert(
                "Configs/AnotherCreatedTestConfig",
                ConfigAsset::Another("AnotherTestString".to_string()),
            );

        let sink = Arc::new(RecordingSink::new());
        let loader = ResourceLoader::with_diagnostics(backend, sink.clone());
        (loader, sink)
    }

    #[test]
    fn test_load_with_explicit_path() {
        let (loader, _) = loader();
        let config = loader
            .resolver::<CreatedTestConfig>()
            .load(Some("Configs/CreatedTestConfig"));

        assert_eq!(config.unwrap().test_string, "TestString");
    }

    #[test]
    fn test_load_from_descriptor() {
        let (loader, sink) = loader();
        let config = loader.load::<CreatedTestConfig>(None);

        assert_eq!(config.unwrap().test_string, "TestString");
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_cache_hit_returns_same_instance() {
        let (loader, _) = loader();
        let resolver = loader.resolver::<CreatedTestConfig>();

        let first = resolver.load(None).unwrap();
        let second = resolver.load(None).unwrap();

        assert!(first.ptr_eq(&second));
        assert_eq!(loader.backend().query_count(), 1);
    }

    #[test]
    fn test_clear_cache_forces_backend_query() {
        let (loader, _) = loader();
        let resolver = loader.resolver::<CreatedTestConfig>();

        resolver.load(None).unwrap();
        resolver.clear_cache();
        resolver.load(None).unwrap();

        assert_eq!(loader.backend().query_count(), 2);
        assert_eq!(loader.cache().len::<CreatedTestConfig>(), 1);
    }

    #[test]
    fn test_load_missing_warns_once() {
        let (loader, sink) = loader();
        let missing = loader.load::<NotCreatedTestConfig>(None);

        assert!(missing.is_none());
        assert_eq!(
            sink.messages(),
            vec![
                "[ResourceLoader::Load] Failed to load resource at path: Configs/NotCreatedTestConfig"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_try_load_missing_is_silent() {
        let (loader, sink) = loader();

        assert!(loader.try_load::<NotCreatedTestConfig>(None).is_none());
        assert!(loader.try_load::<CreatedTestConfig>(None).is_some());
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_missing_is_not_cached() {
        let (loader, _) = loader();
        let resolver = loader.resolver::<NotCreatedTestConfig>();

        assert!(resolver.try_load(None).is_none());
        assert!(resolver.try_load(None).is_none());

        assert_eq!(loader.backend().query_count(), 2);
        assert!(loader.cache().is_empty::<NotCreatedTestConfig>());
    }

    #[test]
    fn test_fetch_reports_not_found() {
        let (loader, _) = loader();
        let error = loader
            .resolver::<NotCreatedTestConfig>()
            .fetch(Some("Configs/Elsewhere"))
            .unwrap_err();

        assert_eq!(
            error,
            ResourceError::NotFound {
                path: "Configs/Elsewhere".to_string()
            }
        );
    }

    #[test]
    fn test_load_all_returns_every_match() {
        let (loader, _) = loader();
        let assets = loader.load_all::<ConfigAsset>(Some("Configs"));

        assert_eq!(assets.len(), 2);
        assert!(assets
            .iter()
            .any(|a| matches!(a.get(), ConfigAsset::Created(s) if s == "TestString")));
        assert!(assets
            .iter()
            .any(|a| matches!(a.get(), ConfigAsset::Another(s) if s == "AnotherTestString")));
    }

    #[test]
    fn test_load_all_is_cached() {
        let (loader, _) = loader();
        let resolver = loader.resolver::<ConfigAsset>();

        let first = resolver.load_all(Some("Configs"));
        let second = resolver.load_all(Some("Configs"));

        assert_eq!(first, second);
        assert_eq!(loader.backend().query_count(), 1);
    }

    #[test]
    fn test_load_all_empty_is_not_an_error() {
        let (loader, sink) = loader();
        let resolver = loader.resolver::<ConfigAsset>();

        assert!(resolver.load_all(Some("Missing")).is_empty());
        assert!(resolver.try_load_all(Some("Missing")).is_none());
        assert!(sink.messages().is_empty());
        assert_eq!(loader.backend().query_count(), 1);
        assert_eq!(loader.cache().len::<ConfigAsset>(), 1);

        resolver.clear_cache();
        assert!(resolver.load_all(Some("Missing")).is_empty());
        assert_eq!(loader.backend().query_count(), 2);
    }

    #[test]
    fn test_clear_cache_is_per_type() {
        let (loader, _) = loader();
        loader.load::<CreatedTestConfig>(None).unwrap();
        loader.load_all::<ConfigAsset>(Some("Configs"));

        loader.clear_cache::<ConfigAsset>();

        assert!(loader.cache().is_empty::<ConfigAsset>());
        assert_eq!(loader.cache().len::<CreatedTestConfig>(), 1);
    }
}
