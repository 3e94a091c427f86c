//! Type exclusion filters
//!
//! A filter decides whether the validation traversal should treat a type as
//! an opaque leaf instead of descending into its properties. Every filter
//! looks at the queried type and at each of its supertypes, so excluding a
//! type also excludes everything derived from it.

use crate::core::descriptor::{TypeDescriptor, ancestry};
use crate::core::error::{ExcludeError, Result};
use std::any::{TypeId, type_name};
use std::fmt;

/// Capability shared by every exclusion strategy
///
/// The registry only ever sees filters through this trait, so new
/// strategies can be added without touching it.
pub trait TypeExcludeFilter: Send + Sync {
    /// Whether `ty` (or one of its supertypes) is excluded from validation
    fn is_type_excluded(&self, ty: &dyn TypeDescriptor) -> Result<bool>;

    /// Short human-readable description used in logs
    fn describe(&self) -> String;
}

/// Walk the ancestry of a type and report whether any link matches
///
/// Types without a name are walked like any other; they just never match
/// a name comparison.
fn any_in_ancestry<F>(ty: &dyn TypeDescriptor, mut matches: F) -> Result<bool>
where
    F: FnMut(&dyn TypeDescriptor) -> bool,
{
    for current in ancestry(ty) {
        if matches(current?) {
            return Ok(true);
        }
    }

    Ok(false)
}

// =============================================================================
// Name-based filter
// =============================================================================

/// Excludes a type by its fully-qualified name
///
/// Names are compared ordinally: `"app::Wrapper"` does not match
/// `"App::Wrapper"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNameExcludeFilter {
    excluded_type_name: String,
}

impl TypeNameExcludeFilter {
    /// Create a filter excluding the type named `type_full_name`
    pub fn new(type_full_name: impl Into<String>) -> Result<Self> {
        let excluded_type_name = type_full_name.into();
        if excluded_type_name.is_empty() {
            return Err(ExcludeError::invalid_argument(
                "type_full_name",
                "excluded type name must not be empty",
            ));
        }
        Ok(Self { excluded_type_name })
    }

    /// The fully-qualified name excluded by this filter
    pub fn excluded_type_name(&self) -> &str {
        &self.excluded_type_name
    }
}

impl TypeExcludeFilter for TypeNameExcludeFilter {
    fn is_type_excluded(&self, ty: &dyn TypeDescriptor) -> Result<bool> {
        any_in_ancestry(ty, |current| {
            current.full_name() == Some(self.excluded_type_name.as_str())
        })
    }

    fn describe(&self) -> String {
        format!("type name '{}'", self.excluded_type_name)
    }
}

// =============================================================================
// Identity-based filter
// =============================================================================

/// Excludes a Rust type by its `TypeId`
///
/// Only descriptors that report a [`TypeDescriptor::runtime_type_id`] can
/// match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeIdExcludeFilter {
    type_id: TypeId,
    type_name: &'static str,
}

impl TypeIdExcludeFilter {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    pub fn excluded_type_id(&self) -> TypeId {
        self.type_id
    }
}

impl TypeExcludeFilter for TypeIdExcludeFilter {
    fn is_type_excluded(&self, ty: &dyn TypeDescriptor) -> Result<bool> {
        any_in_ancestry(ty, |current| current.runtime_type_id() == Some(self.type_id))
    }

    fn describe(&self) -> String {
        format!("type '{}'", self.type_name)
    }
}

// =============================================================================
// Namespace-based filter
// =============================================================================

const PATH_SEPARATOR: &str = "::";

/// Excludes every type declared under a module path
///
/// `"app::internal"` matches `"app::internal::Wrapper"` and
/// `"app::internal::nested::Buffer"`, but neither `"app::internals::Wrapper"`
/// nor a type named exactly `"app::internal"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceExcludeFilter {
    prefix: String,
}

impl NamespaceExcludeFilter {
    pub fn new(namespace: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        let trimmed = namespace.trim_end_matches(PATH_SEPARATOR);
        if trimmed.is_empty() {
            return Err(ExcludeError::invalid_argument(
                "namespace",
                "excluded namespace must not be empty",
            ));
        }
        Ok(Self {
            prefix: format!("{}{}", trimmed, PATH_SEPARATOR),
        })
    }

    /// The namespace excluded by this filter, without trailing separator
    pub fn namespace(&self) -> &str {
        &self.prefix[..self.prefix.len() - PATH_SEPARATOR.len()]
    }

    fn contains(&self, name: &str) -> bool {
        name.len() > self.prefix.len() && name.starts_with(&self.prefix)
    }
}

impl TypeExcludeFilter for NamespaceExcludeFilter {
    fn is_type_excluded(&self, ty: &dyn TypeDescriptor) -> Result<bool> {
        any_in_ancestry(ty, |current| {
            current.full_name().is_some_and(|name| self.contains(name))
        })
    }

    fn describe(&self) -> String {
        format!("namespace '{}'", self.namespace())
    }
}

// =============================================================================
// Predicate-based filter
// =============================================================================

type Predicate = dyn Fn(&dyn TypeDescriptor) -> bool + Send + Sync;

/// Excludes types for which a caller-supplied predicate holds
///
/// The predicate is applied to the queried type and to each supertype.
pub struct PredicateExcludeFilter {
    label: String,
    predicate: Box<Predicate>,
}

impl PredicateExcludeFilter {
    pub fn new<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&dyn TypeDescriptor) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl fmt::Debug for PredicateExcludeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateExcludeFilter")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl TypeExcludeFilter for PredicateExcludeFilter {
    fn is_type_excluded(&self, ty: &dyn TypeDescriptor) -> Result<bool> {
        any_in_ancestry(ty, |current| (self.predicate)(current))
    }

    fn describe(&self) -> String {
        format!("predicate '{}'", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::{MAX_ANCESTRY_DEPTH, TypeInfo};
    use std::sync::Arc;

    struct SelfReferential;

    impl TypeDescriptor for SelfReferential {
        fn full_name(&self) -> Option<&str> {
            Some("Loop")
        }

        fn base_type(&self) -> Option<&dyn TypeDescriptor> {
            Some(self)
        }
    }

    fn object() -> Arc<TypeInfo> {
        TypeInfo::new("Object").into_shared()
    }

    fn customer() -> TypeInfo {
        let person = TypeInfo::new("Person").with_base(object()).into_shared();
        TypeInfo::new("Customer").with_base(person)
    }

    fn wrapper_subtype() -> TypeInfo {
        let wrapper = TypeInfo::new("App.Internal.Wrapper")
            .with_base(object())
            .into_shared();
        TypeInfo::new("InternalWrapperSubtype").with_base(wrapper)
    }

    // === TypeNameExcludeFilter ===

    #[test]
    fn test_name_filter_rejects_empty_name() {
        let err = TypeNameExcludeFilter::new("").unwrap_err();
        assert!(matches!(
            err,
            ExcludeError::InvalidArgument { ref argument, .. } if argument == "type_full_name"
        ));
    }

    #[test]
    fn test_name_filter_keeps_name() {
        let filter = TypeNameExcludeFilter::new("App.Internal.Wrapper").unwrap();
        assert_eq!(filter.excluded_type_name(), "App.Internal.Wrapper");
        assert_eq!(filter.describe(), "type name 'App.Internal.Wrapper'");
    }

    #[test]
    fn test_name_filter_matches_exact_type() {
        let filter = TypeNameExcludeFilter::new("Customer").unwrap();
        assert!(filter.is_type_excluded(&customer()).unwrap());
    }

    #[test]
    fn test_name_filter_matches_through_ancestor() {
        let filter = TypeNameExcludeFilter::new("App.Internal.Wrapper").unwrap();
        assert!(filter.is_type_excluded(&wrapper_subtype()).unwrap());
        assert!(!filter.is_type_excluded(&customer()).unwrap());
    }

    #[test]
    fn test_name_filter_matches_root() {
        let filter = TypeNameExcludeFilter::new("Object").unwrap();
        assert!(filter.is_type_excluded(&customer()).unwrap());
    }

    #[test]
    fn test_name_filter_does_not_match_subtype_of_queried_type() {
        let filter = TypeNameExcludeFilter::new("Customer").unwrap();
        let person = TypeInfo::new("Person").with_base(object());
        assert!(!filter.is_type_excluded(&person).unwrap());
    }

    #[test]
    fn test_name_filter_is_case_sensitive() {
        let filter = TypeNameExcludeFilter::new("customer").unwrap();
        assert!(!filter.is_type_excluded(&customer()).unwrap());
    }

    #[test]
    fn test_name_filter_matches_unnamed_type_through_ancestor() {
        let wrapper = TypeInfo::new("App.Internal.Wrapper")
            .with_base(object())
            .into_shared();
        let generic = TypeInfo::unnamed().with_base(wrapper);
        let filter = TypeNameExcludeFilter::new("App.Internal.Wrapper").unwrap();
        assert!(filter.is_type_excluded(&generic).unwrap());
    }

    #[test]
    fn test_name_filter_unnamed_root_not_excluded() {
        let filter = TypeNameExcludeFilter::new("Customer").unwrap();
        assert!(!filter.is_type_excluded(&TypeInfo::unnamed()).unwrap());
    }

    #[test]
    fn test_name_filter_skips_unnamed_ancestor() {
        let generic = TypeInfo::unnamed().with_base(object()).into_shared();
        let ty = TypeInfo::new("Closed").with_base(generic);
        let filter = TypeNameExcludeFilter::new("Object").unwrap();
        assert!(filter.is_type_excluded(&ty).unwrap());
    }

    #[test]
    fn test_name_filter_detects_cycle() {
        let filter = TypeNameExcludeFilter::new("Missing").unwrap();
        let err = filter.is_type_excluded(&SelfReferential).unwrap_err();
        assert!(matches!(err, ExcludeError::InvariantViolation(_)));
    }

    #[test]
    fn test_name_filter_matches_before_cycle_bound() {
        let filter = TypeNameExcludeFilter::new("Loop").unwrap();
        assert!(filter.is_type_excluded(&SelfReferential).unwrap());
    }

    #[test]
    fn test_name_filter_matches_at_max_depth() {
        let mut ty = TypeInfo::new("Deepest");
        for i in 0..MAX_ANCESTRY_DEPTH {
            ty = TypeInfo::new(format!("Level{}", i)).with_base(ty.into_shared());
        }
        let filter = TypeNameExcludeFilter::new("Deepest").unwrap();
        assert!(filter.is_type_excluded(&ty).unwrap());
    }

    #[test]
    fn test_name_filter_is_idempotent() {
        let filter = TypeNameExcludeFilter::new("App.Internal.Wrapper").unwrap();
        let ty = wrapper_subtype();
        let first = filter.is_type_excluded(&ty).unwrap();
        let second = filter.is_type_excluded(&ty).unwrap();
        assert_eq!(first, second);
    }

    // === TypeIdExcludeFilter ===

    struct Wrapper;
    struct Plain;

    #[test]
    fn test_type_id_filter_matches_described_type() {
        let filter = TypeIdExcludeFilter::of::<Wrapper>();
        assert!(filter.is_type_excluded(&TypeInfo::of::<Wrapper>()).unwrap());
        assert!(!filter.is_type_excluded(&TypeInfo::of::<Plain>()).unwrap());
        assert_eq!(filter.excluded_type_id(), TypeId::of::<Wrapper>());
    }

    #[test]
    fn test_type_id_filter_matches_through_ancestor() {
        let filter = TypeIdExcludeFilter::of::<Wrapper>();
        let ty = TypeInfo::new("Derived").with_base(TypeInfo::of::<Wrapper>().into_shared());
        assert!(filter.is_type_excluded(&ty).unwrap());
    }

    #[test]
    fn test_type_id_filter_ignores_names() {
        let filter = TypeIdExcludeFilter::of::<Wrapper>();
        let same_name = TypeInfo::new(std::any::type_name::<Wrapper>());
        assert!(!filter.is_type_excluded(&same_name).unwrap());
    }

    #[test]
    fn test_type_id_filter_describe() {
        let filter = TypeIdExcludeFilter::of::<String>();
        assert_eq!(filter.describe(), "type 'alloc::string::String'");
    }

    // === NamespaceExcludeFilter ===

    #[test]
    fn test_namespace_filter_rejects_empty() {
        assert!(NamespaceExcludeFilter::new("").is_err());
        assert!(NamespaceExcludeFilter::new("::").is_err());
    }

    #[test]
    fn test_namespace_filter_normalizes_trailing_separator() {
        let filter = NamespaceExcludeFilter::new("app::internal::").unwrap();
        assert_eq!(filter.namespace(), "app::internal");
        assert_eq!(filter, NamespaceExcludeFilter::new("app::internal").unwrap());
    }

    #[test]
    fn test_namespace_filter_matches_nested_types() {
        let filter = NamespaceExcludeFilter::new("app::internal").unwrap();
        assert!(filter
            .is_type_excluded(&TypeInfo::new("app::internal::Wrapper"))
            .unwrap());
        assert!(filter
            .is_type_excluded(&TypeInfo::new("app::internal::nested::Buffer"))
            .unwrap());
    }

    #[test]
    fn test_namespace_filter_respects_segment_boundary() {
        let filter = NamespaceExcludeFilter::new("app::internal").unwrap();
        assert!(!filter
            .is_type_excluded(&TypeInfo::new("app::internals::Wrapper"))
            .unwrap());
        assert!(!filter
            .is_type_excluded(&TypeInfo::new("app::internal"))
            .unwrap());
    }

    #[test]
    fn test_namespace_filter_matches_through_ancestor() {
        let base = TypeInfo::new("app::internal::Wrapper").into_shared();
        let ty = TypeInfo::new("app::models::Customer").with_base(base);
        let filter = NamespaceExcludeFilter::new("app::internal").unwrap();
        assert!(filter.is_type_excluded(&ty).unwrap());
        assert_eq!(filter.describe(), "namespace 'app::internal'");
    }

    // === PredicateExcludeFilter ===

    #[test]
    fn test_predicate_filter_applies_to_ancestry() {
        let filter = PredicateExcludeFilter::new("wrappers", |ty| {
            ty.full_name().is_some_and(|name| name.ends_with("Wrapper"))
        });
        assert!(filter.is_type_excluded(&wrapper_subtype()).unwrap());
        assert!(!filter.is_type_excluded(&customer()).unwrap());
        assert_eq!(filter.describe(), "predicate 'wrappers'");
    }

    #[test]
    fn test_predicate_filter_applies_to_unnamed_type() {
        let filter = PredicateExcludeFilter::new("always", |_| true);
        assert!(filter.is_type_excluded(&TypeInfo::unnamed()).unwrap());
    }

    #[test]
    fn test_type_id_filter_matches_unnamed_descriptor() {
        let filter = TypeIdExcludeFilter::of::<Wrapper>();
        let ty = TypeInfo::unnamed().with_type_id(TypeId::of::<Wrapper>());
        assert!(filter.is_type_excluded(&ty).unwrap());
    }

    #[test]
    fn test_predicate_filter_debug_hides_closure() {
        let filter = PredicateExcludeFilter::new("always", |_| true);
        assert_eq!(
            format!("{:?}", filter),
            "PredicateExcludeFilter { label: \"always\", .. }"
        );
    }
}
