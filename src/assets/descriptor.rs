//! Resource descriptors and path resolution
//!
//! Every loadable type declares where it lives through [`Resource::DESCRIPTOR`].
//! [`resolve_path`] turns that declaration (or an explicit override) into the
//! key used against both the cache and the storage backend.

/// Static metadata describing where a resource type is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceDescriptor {
    /// Editor-side asset location. Informational only.
    pub asset_path: &'static str,
    /// Logical resource name
    pub name: &'static str,
    /// Directory-like prefix prepended to the name
    pub category_path: &'static str,
}

impl ResourceDescriptor {
    /// Create a descriptor with just a name
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self {
            asset_path: "",
            name,
            category_path: "",
        }
    }

    /// Set the category prefix
    #[must_use]
    pub const fn in_category(mut self, category_path: &'static str) -> Self {
        self.category_path = category_path;
        self
    }

    /// Set the editor asset path
    #[must_use]
    pub const fn with_asset_path(mut self, asset_path: &'static str) -> Self {
        self.asset_path = asset_path;
        self
    }

    /// Full lookup path derived from this descriptor.
    ///
    /// Returns `None` when the name is blank, since no path can be derived then.
    #[must_use]
    pub fn full_path(&self) -> Option<String> {
        if is_blank(self.name) {
            return None;
        }

        if is_blank(self.category_path) {
            Some(self.name.to_string())
        } else {
            Some(format!("{}/{}", self.category_path, self.name))
        }
    }
}

/// A type that can be loaded through the resource loader.
///
/// # Example
///
/// ```
/// use asset_loader::assets::{Resource, ResourceDescriptor, resolve_path};
///
/// struct AudioSettings;
///
/// impl Resource for AudioSettings {
///     const DESCRIPTOR: Option<ResourceDescriptor> =
///         Some(ResourceDescriptor::named("AudioSettings").in_category("Configs"));
/// }
///
/// assert_eq!(resolve_path::<AudioSettings>(None), "Configs/AudioSettings");
/// ```
pub trait Resource: Send + Sync + 'static {
    /// Where instances of this type are stored, if declared
    const DESCRIPTOR: Option<ResourceDescriptor> = None;

    /// Bare identifier used as the resource name when nothing else is declared
    fn type_identifier() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// Compute the lookup path for `T`.
///
/// Precedence: explicit path (verbatim), then the descriptor's name with its
/// optional category, then the bare type identifier.
#[must_use]
pub fn resolve_path<T: Resource>(explicit: Option<&str>) -> String {
    if let Some(path) = explicit {
        return path.to_string();
    }

    T::DESCRIPTOR
        .and_then(|descriptor| descriptor.full_path())
        .unwrap_or_else(|| T::type_identifier().to_string())
}

/// Strip the module path and generic arguments from a type name
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Described;

    impl Resource for Described {
        const DESCRIPTOR: Option<ResourceDescriptor> =
            Some(ResourceDescriptor::named("X").in_category("Configs"));
    }

    struct Uncategorized;

    impl Resource for Uncategorized {
        const DESCRIPTOR: Option<ResourceDescriptor> = Some(ResourceDescriptor::named("X"));
    }

    struct Undescribed;

    impl Resource for Undescribed {}

    struct Nameless;

    impl Resource for Nameless {
        const DESCRIPTOR: Option<ResourceDescriptor> =
            Some(ResourceDescriptor::named("  ").in_category("Configs"));
    }

    struct Generic<T>(T);

    impl<T: Send + Sync + 'static> Resource for Generic<T> {}

    #[test]
    fn test_explicit_path_wins() {
        assert_eq!(resolve_path::<Described>(Some("Other/Path")), "Other/Path");
        assert_eq!(resolve_path::<Undescribed>(Some("Other/Path")), "Other/Path");
        assert_eq!(resolve_path::<Described>(Some("")), "");
    }

    #[test]
    fn test_descriptor_precedence() {
        assert_eq!(resolve_path::<Described>(None), "Configs/X");
        assert_eq!(resolve_path::<Uncategorized>(None), "X");
    }

    #[test]
    fn test_type_identifier_fallback() {
        assert_eq!(resolve_path::<Undescribed>(None), "Undescribed");
        assert_eq!(resolve_path::<Nameless>(None), "Nameless");
        assert_eq!(resolve_path::<Generic<u32>>(None), "Generic");
    }

    #[test]
    fn test_blank_name_has_no_full_path() {
        assert_eq!(ResourceDescriptor::named("").full_path(), None);
        assert_eq!(
            ResourceDescriptor::named("Config")
                .in_category(" ")
                .full_path()
                .as_deref(),
            Some("Config")
        );
    }

    #[test]
    fn test_asset_path_is_ignored() {
        let descriptor = ResourceDescriptor::named("X").with_asset_path("Assets/Resources/X.asset");
        assert_eq!(descriptor.full_path().as_deref(), Some("X"));
    }
}
