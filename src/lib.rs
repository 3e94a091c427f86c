//! # This-RS Validation Exclusions
//!
//! Decides which types a recursive request-validation walk should skip.
//!
//! When a model binder validates an incoming payload it walks the bound
//! object graph and, for every nested value, either descends into its
//! properties or treats it as an opaque leaf. This crate answers that
//! question: an [`ExclusionRegistry`](core::validation::ExclusionRegistry)
//! holds exclusion filters and reports whether any of them excludes a type
//! or one of its supertypes.
//!
//! ## Features
//!
//! - **Inheritance-aware**: excluding a type excludes everything derived from it
//! - **Pluggable filters**: by name, by Rust `TypeId`, by namespace or by predicate
//! - **Configuration-Based**: declare exclusions in YAML
//! - **Thread-safe**: a sealed registry is immutable and shared behind an `Arc`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use this_validation_exclude::prelude::*;
//!
//! let mut registry = ExclusionRegistry::new();
//! registry.add_type_name("App.Internal.Wrapper")?;
//! registry.seal();
//!
//! let object = TypeInfo::new("Object").into_shared();
//! let wrapper = TypeInfo::new("App.Internal.Wrapper").with_base(object).into_shared();
//! let subtype = TypeInfo::new("InternalWrapperSubtype").with_base(wrapper);
//!
//! assert!(registry.is_excluded(&subtype)?);
//! ```

pub mod config;
pub mod core;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Type abstraction ===
    pub use crate::core::{
        catalog::{TypeCatalog, TypeDeclaration},
        descriptor::{MAX_ANCESTRY_DEPTH, TypeDescriptor, TypeInfo, ancestry},
    };

    // === Filters ===
    pub use crate::core::validation::{
        ExclusionRegistry, NamespaceExcludeFilter, PredicateExcludeFilter, TypeExcludeFilter,
        TypeIdExcludeFilter, TypeNameExcludeFilter,
    };

    // === Errors ===
    pub use crate::core::error::ExcludeError;

    // === Config ===
    pub use crate::config::{DEFAULT_EXCLUDED_TYPES, ExclusionConfig};
}
