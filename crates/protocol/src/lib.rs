//! Switch request messages and wire codec.
//!
//! One message type flows from the initiator to the authority and nothing
//! flows back: the protocol is fire-and-forget, and completion is observed
//! only through the slot mutation and the authority-side completion hook.
//! A rejected or lost request is simply re-issued by the initiator.
//!
//! Two positional addressing modes exist historically; a deployment uses
//! exactly one wire shape ([`FamilySwitchMessage`] or
//! [`IndexSwitchMessage`]), and both funnel into the shared
//! [`SwitchRequest`] the authority validates.

#![warn(missing_docs)]

pub mod message;
pub mod wire;

pub use message::{SwitchRequest, SwitchTarget};
pub use wire::{FamilySwitchMessage, IndexSwitchMessage, WireError};
