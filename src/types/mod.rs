//! Base types and type-version chains
//!
//! A "resource configuration" starts from a base type (git, registry-image,
//! time, ...) registered in the persistent [`TypeCatalog`]. When a source is
//! interpreted through custom types, the ordered [`TypeVersionChain`] of those
//! types' own pinned versions participates in the configuration's identity:
//! the same source parameters mean different things under different type
//! versions.

pub mod catalog;
pub mod chain;
pub mod source;

pub use catalog::{BaseType, TypeCatalog};
pub use chain::{TypeVersion, TypeVersionChain};
pub use source::SourceParams;
