//! Authoritative side of the multitool switch protocol.
//!
//! Holds the source-of-truth registry and watch list, resolves inbound
//! [`SwitchRequest`](toolmux_protocol::SwitchRequest)s against them, and
//! applies valid switches to inventory slots:
//! - [`Authority`]: Façade owning registry, watch list, inventories, and
//!   the executor under the concurrency contract
//! - [`SwitchExecutor`]: Applies a validated switch to a slot
//! - [`InventoryStore`] / [`Inventory`] / [`Slot`]: In-memory inventory
//!   model the authority mutates
//!
//! Any registry copy an initiator keeps for display purposes is advisory;
//! validation here never consults it.

#![warn(missing_docs)]

pub mod authority;
pub mod executor;
pub mod inventory;

#[cfg(test)]
mod tests;

pub use authority::Authority;
pub use executor::{SwitchExecutor, SwitchHook};
pub use inventory::{Inventory, InventoryStore, Slot, SlotAddr};
