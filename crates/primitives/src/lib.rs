//! Identifier and attribute primitives shared across the multitool core.
//!
//! This crate provides the foundational types the registry, protocol, and
//! authority crates build on:
//! - [`VariantId`]: Namespaced identifier for one concrete tool definition
//! - [`FamilyId`]: Key grouping interchangeable variants
//! - [`PartyId`]: Identity of the party acting on a slot
//! - [`AttrValue`] / [`AttrTree`]: Opaque attribute store carried by items
//! - [`ToolInstance`]: A concrete item with a variant and attributes

#![warn(missing_docs)]

pub mod attr;
pub mod id;
pub mod instance;

pub use attr::{AttrTree, AttrValue};
pub use id::{FamilyId, IdError, PartyId, VariantId};
pub use instance::ToolInstance;
