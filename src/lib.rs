//! checkstore - check coordination and version catalog for pipeline orchestrators
//!
//! Many independent scheduler and worker processes share one on-disk catalog
//! of "resource configurations" and the versions discovered for them. This
//! crate provides the pieces those processes coordinate through:
//!
//! - `types`: the persistent catalog of known base types and the ordered
//!   type-version chains used to interpret a source
//! - `identity`: stable, content-derived identities for resource
//!   configurations
//! - `lock`: the non-blocking, interval-throttled check lock scoped to one
//!   identity
//! - `store`: spaces and the recency-ordered version catalog
//!
//! Execution of the checks themselves, worker transport and credential
//! resolution live outside this crate; callers resolve an identity, take the
//! check lock, run their check, and write the results back through the store.

pub mod config;
pub mod identity;
pub mod lock;
pub mod observability;
pub mod storage;
pub mod store;
pub mod types;
