//! Validation traversal exclusions
//!
//! Decides which types a recursive validation walk should treat as opaque
//! leaves. Filters implement [`TypeExcludeFilter`]; the
//! [`ExclusionRegistry`] combines them with OR semantics.

pub mod filters;
pub mod registry;

pub use filters::{
    NamespaceExcludeFilter, PredicateExcludeFilter, TypeExcludeFilter, TypeIdExcludeFilter,
    TypeNameExcludeFilter,
};
pub use registry::ExclusionRegistry;
