//! Resource resolution and caching
//!
//! Provides typed resource loading with:
//! - Per-type descriptors resolved into lookup paths
//! - A per-type cache shared by every call site
//! - Pluggable storage backends (in-memory, directory)
//! - Absence reported as `None`, never as a panic

mod backend;
mod cache;
mod descriptor;
mod diagnostics;
mod directory;
mod handle;
mod loader;

pub use backend::{MemoryBackend, StorageBackend, is_under};
pub use cache::ResourceCache;
pub use descriptor::{Resource, ResourceDescriptor, resolve_path};
pub use diagnostics::{DiagnosticSink, LogSink, RecordingSink};
pub use directory::DirectoryBackend;
pub use handle::ResourceHandle;
pub use loader::{ResourceError, ResourceLoader, ResourceResolver};
