//! Directory-backed storage
//!
//! Resources are RON or JSON files below a root directory. The resolved path
//! `Configs/Audio` maps to `<root>/Configs/Audio.ron` (or `.json`).

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::backend::StorageBackend;

/// Supported file formats, tried in this order
const EXTENSIONS: [&str; 2] = ["ron", "json"];

/// Storage backend reading serialized resources from disk
#[derive(Debug, Clone)]
pub struct DirectoryBackend {
    root: PathBuf,
}

impl DirectoryBackend {
    /// Create a backend rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location of a resolved path, without extension
    fn location(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |location, segment| location.join(segment))
    }

    /// Existing file for a resolved path, if any.
    ///
    /// The extension is appended, so dots inside the name stay part of it.
    /// The root itself is a directory, never a file.
    fn find_file(&self, path: &str) -> Option<PathBuf> {
        if path.trim_matches('/').is_empty() {
            return None;
        }

        let location = self.location(path);
        EXTENSIONS
            .iter()
            .map(|extension| {
                let mut file: OsString = location.clone().into_os_string();
                file.push(".");
                file.push(extension);
                PathBuf::from(file)
            })
            .find(|candidate| candidate.is_file())
    }
}

/// Deserialize a resource file, picking the format from its extension.
///
/// A file that does not parse as `T` holds some other type of resource.
fn read_resource<T: DeserializeOwned>(file: &Path) -> Option<T> {
    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            log::debug!("Could not read {}: {e}", file.display());
            return None;
        }
    };

    let parsed = match file.extension().and_then(|ext| ext.to_str()) {
        Some("ron") => ron::from_str(&content).map_err(|e| e.to_string()),
        Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
        _ => return None,
    };

    match parsed {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!(
                "Skipping {} as {}: {e}",
                file.display(),
                std::any::type_name::<T>()
            );
            None
        }
    }
}

/// Collect resource files below `dir`, sorted for a stable order
fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    let mut paths: Vec<PathBuf> = entries.filter_map(|entry| entry.ok().map(|e| e.path())).collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            collect_files(&path, files);
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| EXTENSIONS.contains(&ext))
        {
            files.push(path);
        }
    }
}

impl<T: DeserializeOwned> StorageBackend<T> for DirectoryBackend {
    fn load_one(&self, path: &str) -> Option<Arc<T>> {
        let file = self.find_file(path)?;
        read_resource(&file).map(Arc::new)
    }

    fn load_all(&self, path: &str) -> Vec<Arc<T>> {
        let mut files: Vec<PathBuf> = self.find_file(path).into_iter().collect();
        collect_files(&self.location(path), &mut files);

        files
            .iter()
            .filter_map(|file| read_resource(file))
            .map(Arc::new)
            .collect()
    }
}
