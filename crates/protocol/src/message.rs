//! In-memory request shape shared by both addressing modes.

use serde::{Deserialize, Serialize};
use toolmux_primitives::FamilyId;

/// What a switch request is aimed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchTarget {
	/// Switch the slot's item within the named family, to that family's
	/// remembered (or first-registered) member.
	ByFamily(FamilyId),
	/// Switch to the variant at this position in the flat registration
	/// order across all families.
	ByIndex(i32),
}

/// A request to switch the item in one inventory slot.
///
/// Built by the initiator per user action, transmitted once, consumed
/// exactly once by the authority, then discarded. Duplicate submission is
/// harmless: validation re-runs and applying a switch to the already-current
/// variant is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchRequest {
	/// Identifier of the inventory the item resides in.
	pub inventory_id: String,
	/// Slot within that inventory.
	pub slot_id: i32,
	/// Target discriminator.
	pub target: SwitchTarget,
}

impl SwitchRequest {
	/// Builds a family-addressed request.
	pub fn by_family(inventory_id: impl Into<String>, slot_id: i32, family: FamilyId) -> Self {
		Self {
			inventory_id: inventory_id.into(),
			slot_id,
			target: SwitchTarget::ByFamily(family),
		}
	}

	/// Builds an index-addressed request.
	pub fn by_index(inventory_id: impl Into<String>, slot_id: i32, tool_index: i32) -> Self {
		Self {
			inventory_id: inventory_id.into(),
			slot_id,
			target: SwitchTarget::ByIndex(tool_index),
		}
	}
}
