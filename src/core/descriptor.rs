//! Runtime type descriptors
//!
//! The exclusion filters never inspect real types. They work on a
//! [`TypeDescriptor`] supplied by the host, which only has to report a
//! fully-qualified name and a link to the direct supertype.

use super::error::{ExcludeError, Result};
use std::any::{TypeId, type_name};
use std::fmt;
use std::sync::Arc;

/// Maximum number of supertype hops walked before the chain is considered corrupt
pub const MAX_ANCESTRY_DEPTH: usize = 64;

/// Handle to a runtime type owned by the host type system
pub trait TypeDescriptor {
    /// Fully-qualified name, unique within the loaded type universe
    ///
    /// `None` for types that have no qualified name (e.g. unbound generic
    /// parameters).
    fn full_name(&self) -> Option<&str>;

    /// Direct supertype, or `None` for a root type
    fn base_type(&self) -> Option<&dyn TypeDescriptor>;

    /// Rust type identity, when the descriptor maps onto a concrete Rust type
    fn runtime_type_id(&self) -> Option<TypeId> {
        None
    }
}

/// Walk a type and its supertypes, starting with the type itself
pub fn ancestry(ty: &dyn TypeDescriptor) -> Ancestry<'_> {
    Ancestry {
        next: Some(ty),
        hops: 0,
        done: false,
    }
}

/// Iterator over a supertype chain
///
/// Yields the starting type first, then each supertype. Once more than
/// [`MAX_ANCESTRY_DEPTH`] hops have been walked it yields a single
/// [`ExcludeError::InvariantViolation`] and stops.
pub struct Ancestry<'a> {
    next: Option<&'a dyn TypeDescriptor>,
    hops: usize,
    done: bool,
}

impl<'a> Iterator for Ancestry<'a> {
    type Item = Result<&'a dyn TypeDescriptor>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = self.next?;

        if self.hops > MAX_ANCESTRY_DEPTH {
            self.done = true;
            let name = current.full_name().unwrap_or("<unnamed>");
            tracing::warn!(
                type_name = %name,
                max_depth = MAX_ANCESTRY_DEPTH,
                "Supertype chain exceeds maximum depth, type system is likely cyclic"
            );
            return Some(Err(ExcludeError::InvariantViolation(format!(
                "supertype chain exceeds {} hops at '{}'",
                MAX_ANCESTRY_DEPTH, name
            ))));
        }

        self.hops += 1;
        self.next = current.base_type();
        Some(Ok(current))
    }
}

/// Immutable, shareable [`TypeDescriptor`]
///
/// Hosts without a type system of their own can describe their model types
/// with `TypeInfo` chains:
///
/// ```rust,ignore
/// let object = TypeInfo::new("Object").into_shared();
/// let person = TypeInfo::new("Person").with_base(object).into_shared();
/// let customer = TypeInfo::new("Customer").with_base(person);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    full_name: Option<String>,
    base: Option<Arc<TypeInfo>>,
    type_id: Option<TypeId>,
}

impl TypeInfo {
    /// Create a root type with the given fully-qualified name
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: Some(full_name.into()),
            base: None,
            type_id: None,
        }
    }

    /// Create a type without a qualified name
    pub fn unnamed() -> Self {
        Self {
            full_name: None,
            base: None,
            type_id: None,
        }
    }

    /// Describe a Rust type by its `type_name` and `TypeId`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            full_name: Some(type_name::<T>().to_string()),
            base: None,
            type_id: Some(TypeId::of::<T>()),
        }
    }

    /// Set the direct supertype
    pub fn with_base(mut self, base: Arc<TypeInfo>) -> Self {
        self.base = Some(base);
        self
    }

    /// Attach a Rust type identity
    pub fn with_type_id(mut self, type_id: TypeId) -> Self {
        self.type_id = Some(type_id);
        self
    }

    /// The direct supertype, if any
    pub fn base(&self) -> Option<&Arc<TypeInfo>> {
        self.base.as_ref()
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl TypeDescriptor for TypeInfo {
    fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    fn base_type(&self) -> Option<&dyn TypeDescriptor> {
        self.base.as_deref().map(|base| base as &dyn TypeDescriptor)
    }

    fn runtime_type_id(&self) -> Option<TypeId> {
        self.type_id
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name.as_deref().unwrap_or("<unnamed>"))
    }
}
