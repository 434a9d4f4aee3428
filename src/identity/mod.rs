//! Configuration identities
//!
//! Independent pipelines declaring "the same" external resource must share
//! one check lock and one version catalog. The identity of a configuration is
//! therefore derived from content, never allocated: SHA-256 over the base
//! type, the canonicalized source parameters, and the ordered type-version
//! chain. Structurally equal inputs produce the same identity in every
//! process with no coordination.

pub mod errors;
pub mod fingerprint;
pub mod record;
pub mod resolver;

pub use errors::{IdentityError, IdentityResult};
pub use fingerprint::Fingerprint;
pub use record::{ConfigId, ConfigIdentity};
pub use resolver::IdentityResolver;
