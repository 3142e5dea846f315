//! Generator configuration.
//!
//! A [`GeneratorConfig`] is built once before a generation run and passed
//! by reference into every naming and emission call; there is no ambient
//! configuration state. All map tables are `BTreeMap` so that iteration
//! order, and therefore output, is deterministic.

use crate::model::Visibility;
use std::collections::BTreeMap;

/// Options recognized by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Source namespace name to proxy namespace name. Namespaces without an
    /// entry fall back to [`Self::namespace_prefix`] + source name.
    pub namespace_map: BTreeMap<String, String>,
    /// Per-namespace class rename overrides: namespace -> class -> new name.
    pub class_renames: BTreeMap<String, BTreeMap<String, String>>,
    /// Prefix prepended to unmapped namespaces.
    pub namespace_prefix: Option<String>,
    /// Suppresses synthesized upcast methods.
    pub omit_upcast_methods: bool,
    /// Forces generated property and method identifiers to PascalCase.
    pub force_property_casing: bool,
    /// Visibility of the Add operation synthesized for media entities.
    pub media_add_visibility: Visibility,
    /// Drops the namespace segment from generated request-path literals.
    pub omit_method_namespace_in_uri_paths: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace_map: BTreeMap::new(),
            class_renames: BTreeMap::new(),
            namespace_prefix: None,
            omit_upcast_methods: false,
            force_property_casing: false,
            media_add_visibility: Visibility::Public,
            omit_method_namespace_in_uri_paths: false,
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a source namespace to a proxy namespace.
    #[must_use]
    pub fn with_namespace_mapping(
        mut self,
        source: impl Into<String>,
        proxy: impl Into<String>,
    ) -> Self {
        self.namespace_map.insert(source.into(), proxy.into());
        self
    }

    /// Renames a class within a namespace.
    #[must_use]
    pub fn with_class_rename(
        mut self,
        namespace: impl Into<String>,
        class: impl Into<String>,
        new_name: impl Into<String>,
    ) -> Self {
        self.class_renames
            .entry(namespace.into())
            .or_default()
            .insert(class.into(), new_name.into());
        self
    }

    /// Sets the global namespace prefix.
    #[must_use]
    pub fn with_namespace_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.namespace_prefix = Some(prefix.into());
        self
    }

    /// Looks up the rename override for a class, if configured.
    #[must_use]
    pub fn rename_for(&self, namespace: &str, class: &str) -> Option<&str> {
        self.class_renames
            .get(namespace)?
            .get(class)
            .map(String::as_str)
    }
}
