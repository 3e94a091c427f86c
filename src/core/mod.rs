//! Core module containing the type abstraction, errors and exclusion filters

pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod validation;

pub use catalog::{TypeCatalog, TypeDeclaration};
pub use descriptor::{Ancestry, MAX_ANCESTRY_DEPTH, TypeDescriptor, TypeInfo, ancestry};
pub use error::{ExcludeError, Result};
pub use validation::{ExclusionRegistry, TypeExcludeFilter};
