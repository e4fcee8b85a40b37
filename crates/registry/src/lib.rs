//! Family registry and watched-attribute list.
//!
//! The registry side of the multitool core:
//! - [`FamilyRegistry`]: Maps families to their ordered member variants,
//!   enforcing system-wide variant uniqueness
//! - [`AttributeWatchList`]: The set of attribute keys preserved across a
//!   switch
//! - [`RegistryError`]: Registration and resolution error taxonomy
//!
//! Both structures are populated by collaborators during a single-threaded
//! startup phase and are read-mostly afterwards; callers needing concurrent
//! access wrap them in a lock (the authority crate does).

#![warn(missing_docs)]

pub mod error;
pub mod family;
pub mod watch;

pub use error::RegistryError;
pub use family::FamilyRegistry;
pub use watch::AttributeWatchList;
