//! Declarative type universe
//!
//! Hosts that do not carry their own reflection data can declare the model
//! types a traversal may meet, together with their supertypes, and get back
//! shared [`TypeInfo`] chains to query the exclusion registry with.

use super::descriptor::TypeInfo;
use anyhow::{Result, anyhow};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single declared type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// Fully-qualified type name
    pub name: String,

    /// Fully-qualified name of the direct supertype
    #[serde(default)]
    pub base: Option<String>,
}

/// On-disk shape of a catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

/// Resolved set of types, kept in declaration order
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: IndexMap<String, Arc<TypeInfo>>,
}

impl TypeCatalog {
    /// Resolve a list of declarations
    ///
    /// Fails on empty or duplicate names, on a base that is never declared
    /// and on cyclic base declarations.
    pub fn from_declarations(declarations: Vec<TypeDeclaration>) -> Result<Self> {
        let mut declared: IndexMap<String, Option<String>> = IndexMap::new();

        for decl in declarations {
            if decl.name.is_empty() {
                return Err(anyhow!("Type declaration with an empty name"));
            }
            if declared.contains_key(&decl.name) {
                return Err(anyhow!("Type '{}' is declared more than once", decl.name));
            }
            declared.insert(decl.name, decl.base);
        }

        let mut resolved: IndexMap<String, Arc<TypeInfo>> = IndexMap::new();

        for name in declared.keys() {
            if resolved.contains_key(name) {
                continue;
            }

            // Climb until a resolved type or a root, remembering the path
            let mut pending: Vec<&str> = Vec::new();
            let mut parent: Option<Arc<TypeInfo>> = None;
            let mut cursor: Option<&str> = Some(name.as_str());

            while let Some(current) = cursor {
                if let Some(found) = resolved.get(current) {
                    parent = Some(Arc::clone(found));
                    break;
                }
                if pending.contains(&current) {
                    return Err(anyhow!(
                        "Cyclic base type declaration involving '{}'",
                        current
                    ));
                }
                let base = declared.get(current).ok_or_else(|| {
                    anyhow!(
                        "Type '{}' declares unknown base type '{}'",
                        pending.last().copied().unwrap_or_default(),
                        current
                    )
                })?;
                pending.push(current);
                cursor = base.as_deref();
            }

            while let Some(current) = pending.pop() {
                let mut info = TypeInfo::new(current);
                if let Some(base) = parent.take() {
                    info = info.with_base(base);
                }
                let shared = info.into_shared();
                resolved.insert(current.to_string(), Arc::clone(&shared));
                parent = Some(shared);
            }
        }

        let types = declared
            .keys()
            .filter_map(|name| {
                resolved
                    .get(name)
                    .map(|info| (name.clone(), Arc::clone(info)))
            })
            .collect();

        tracing::debug!(
            type_count = declared.len(),
            "Resolved type catalog"
        );

        Ok(Self { types })
    }

    /// Load a catalog from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: CatalogConfig = serde_yaml::from_str(yaml)?;
        Self::from_declarations(config.types)
    }

    /// Load a catalog from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Look up a type by its fully-qualified name
    pub fn get(&self, name: &str) -> Option<&Arc<TypeInfo>> {
        self.types.get(name)
    }

    /// Type names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
