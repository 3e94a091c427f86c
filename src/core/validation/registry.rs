//! Registry of exclusion filters consulted by the validation traversal
//!
//! Filters are registered during a configuration phase and evaluated in
//! insertion order afterwards. A type is excluded as soon as one filter
//! excludes it; there is no priority between filters.

use super::filters::{
    NamespaceExcludeFilter, PredicateExcludeFilter, TypeExcludeFilter, TypeIdExcludeFilter,
    TypeNameExcludeFilter,
};
use crate::core::descriptor::TypeDescriptor;
use crate::core::error::{ExcludeError, Result};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Ordered set of exclusion filters
///
/// The registry is append-only until it is sealed, either explicitly with
/// [`ExclusionRegistry::seal`] or implicitly by the first query. A sealed
/// registry is immutable and can be shared across threads behind an `Arc`.
#[derive(Default)]
pub struct ExclusionRegistry {
    filters: Vec<Arc<dyn TypeExcludeFilter>>,
    sealed: AtomicBool,
}

impl ExclusionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sealed: AtomicBool::new(false),
        }
    }

    /// Append a filter
    pub fn add<F>(&mut self, filter: F) -> Result<()>
    where
        F: TypeExcludeFilter + 'static,
    {
        self.add_shared(Arc::new(filter))
    }

    /// Append a filter that is shared with other registries
    pub fn add_shared(&mut self, filter: Arc<dyn TypeExcludeFilter>) -> Result<()> {
        if self.is_sealed() {
            return Err(ExcludeError::InvalidState(format!(
                "cannot register {} after the registry has been sealed",
                filter.describe()
            )));
        }

        tracing::trace!(filter = %filter.describe(), "Registered exclusion filter");
        self.filters.push(filter);
        Ok(())
    }

    /// Exclude a type, and everything derived from it, by fully-qualified name
    pub fn add_type_name(&mut self, type_full_name: impl Into<String>) -> Result<()> {
        self.add(TypeNameExcludeFilter::new(type_full_name)?)
    }

    /// Exclude a Rust type by identity
    pub fn add_type<T: ?Sized + 'static>(&mut self) -> Result<()> {
        self.add(TypeIdExcludeFilter::of::<T>())
    }

    /// Exclude every type under a module path
    pub fn add_namespace(&mut self, namespace: impl Into<String>) -> Result<()> {
        self.add(NamespaceExcludeFilter::new(namespace)?)
    }

    /// Exclude types matching a predicate
    pub fn add_predicate<P>(&mut self, label: impl Into<String>, predicate: P) -> Result<()>
    where
        P: Fn(&dyn TypeDescriptor) -> bool + Send + Sync + 'static,
    {
        self.add(PredicateExcludeFilter::new(label, predicate))
    }

    /// End the configuration phase
    ///
    /// Sealing twice is harmless.
    pub fn seal(&self) {
        if !self.sealed.swap(true, Ordering::AcqRel) {
            tracing::info!(
                filter_count = self.filters.len(),
                "Validation exclusion registry sealed"
            );
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    /// Whether the traversal should skip `ty` and its properties
    ///
    /// Filters are evaluated in insertion order and the first one that
    /// excludes the type wins. Any filter error aborts the query.
    pub fn is_excluded(&self, ty: &dyn TypeDescriptor) -> Result<bool> {
        let type_name = ty.full_name().unwrap_or("<unnamed>");

        if !self.is_sealed() {
            self.seal();
        }

        for filter in &self.filters {
            if filter.is_type_excluded(ty)? {
                tracing::debug!(
                    type_name = %type_name,
                    filter = %filter.describe(),
                    "Type excluded from validation"
                );
                return Ok(true);
            }
        }

        tracing::trace!(
            type_name = %type_name,
            filter_count = self.filters.len(),
            "Type not excluded"
        );
        Ok(false)
    }

    /// Registered filters in evaluation order
    pub fn filters(&self) -> impl Iterator<Item = &dyn TypeExcludeFilter> {
        self.filters.iter().map(|f| &**f)
    }

    /// Descriptions of the registered filters, in evaluation order
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.describe()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl fmt::Debug for ExclusionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExclusionRegistry")
            .field("filters", &self.descriptions())
            .field("sealed", &self.is_sealed())
            .finish()
    }
}
