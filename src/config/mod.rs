//! Configuration loading for validation exclusions

use crate::core::validation::ExclusionRegistry;
use anyhow::Result;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Standard library types that never carry user input worth validating
///
/// Registered by name so that they are excluded even when the host's type
/// descriptors carry no Rust type identity. The names are spelled the way
/// `std::any::type_name` currently prints them; that output is not
/// guaranteed to be stable across compiler releases, so hosts that build
/// descriptors with [`TypeInfo::of`](crate::core::descriptor::TypeInfo::of)
/// should prefer `ExclusionRegistry::add_type` for exact matches.
pub const DEFAULT_EXCLUDED_TYPES: &[&str] = &[
    "core::any::TypeId",
    "core::time::Duration",
    "std::path::PathBuf",
];

fn default_include_defaults() -> bool {
    true
}

/// Declarative description of the exclusion registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionConfig {
    /// Register [`DEFAULT_EXCLUDED_TYPES`] before the configured entries
    #[serde(default = "default_include_defaults")]
    pub include_defaults: bool,

    /// Fully-qualified names of excluded types
    #[serde(default)]
    pub excluded_types: Vec<String>,

    /// Module paths whose types are all excluded
    #[serde(default)]
    pub excluded_namespaces: Vec<String>,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            include_defaults: true,
            excluded_types: Vec::new(),
            excluded_namespaces: Vec::new(),
        }
    }
}

impl ExclusionConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Merge several configurations into one
    ///
    /// Entries keep the order of their first occurrence and duplicates are
    /// dropped. Defaults are included if any input asks for them; merging
    /// nothing yields a configuration without defaults.
    pub fn merge(configs: Vec<ExclusionConfig>) -> Self {
        let mut include_defaults = false;
        let mut excluded_types: IndexSet<String> = IndexSet::new();
        let mut excluded_namespaces: IndexSet<String> = IndexSet::new();

        for config in configs {
            include_defaults |= config.include_defaults;
            excluded_types.extend(config.excluded_types);
            excluded_namespaces.extend(config.excluded_namespaces);
        }

        Self {
            include_defaults,
            excluded_types: excluded_types.into_iter().collect(),
            excluded_namespaces: excluded_namespaces.into_iter().collect(),
        }
    }

    /// Build an unsealed registry holding the configured filters
    ///
    /// Order: defaults, then type names, then namespaces. The caller may
    /// register further filters before the first query.
    pub fn build_registry(&self) -> Result<ExclusionRegistry> {
        let mut registry = ExclusionRegistry::new();

        if self.include_defaults {
            for name in DEFAULT_EXCLUDED_TYPES {
                registry.add_type_name(*name)?;
            }
        }

        for name in &self.excluded_types {
            registry.add_type_name(name.as_str())?;
        }

        for namespace in &self.excluded_namespaces {
            registry.add_namespace(namespace.as_str())?;
        }

        tracing::debug!(
            filter_count = registry.len(),
            include_defaults = self.include_defaults,
            "Built validation exclusion registry from configuration"
        );

        Ok(registry)
    }
}
