//! Flat wire shapes and their codec.
//!
//! Messages cross a serialization boundary, so the wire shapes are flat
//! structs of exact-width primitives: a string inventory identifier, an
//! `i32` slot identifier, and either a string family identifier or an `i32`
//! ordinal. Encoding is postcard; transport is the host's concern.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use thiserror::Error;
use toolmux_primitives::FamilyId;

use crate::message::{SwitchRequest, SwitchTarget};

/// Wire codec failures.
#[derive(Debug, Error)]
pub enum WireError {
	/// The payload could not be encoded or decoded.
	#[error("wire codec error: {0}")]
	Codec(#[from] postcard::Error),
}

/// Family-addressed wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilySwitchMessage {
	/// Identifier of the inventory the item resides in.
	pub inventory_id: String,
	/// Slot within that inventory.
	pub slot_id: i32,
	/// Family to switch within.
	pub family: String,
}

/// Index-addressed wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSwitchMessage {
	/// Identifier of the inventory the item resides in.
	pub inventory_id: String,
	/// Slot within that inventory.
	pub slot_id: i32,
	/// Position in the flat variant registration order.
	pub tool_index: i32,
}

impl From<FamilySwitchMessage> for SwitchRequest {
	fn from(msg: FamilySwitchMessage) -> Self {
		Self {
			inventory_id: msg.inventory_id,
			slot_id: msg.slot_id,
			target: SwitchTarget::ByFamily(FamilyId::new(msg.family)),
		}
	}
}

impl From<IndexSwitchMessage> for SwitchRequest {
	fn from(msg: IndexSwitchMessage) -> Self {
		Self {
			inventory_id: msg.inventory_id,
			slot_id: msg.slot_id,
			target: SwitchTarget::ByIndex(msg.tool_index),
		}
	}
}

impl SwitchRequest {
	/// Converts into the family-addressed wire shape.
	///
	/// Returns `None` for an index-addressed request; a deployment speaks
	/// one shape and never mixes them on a channel.
	pub fn into_family_message(self) -> Option<FamilySwitchMessage> {
		match self.target {
			SwitchTarget::ByFamily(family) => Some(FamilySwitchMessage {
				inventory_id: self.inventory_id,
				slot_id: self.slot_id,
				family: family.as_str().to_string(),
			}),
			SwitchTarget::ByIndex(_) => None,
		}
	}

	/// Converts into the index-addressed wire shape.
	pub fn into_index_message(self) -> Option<IndexSwitchMessage> {
		match self.target {
			SwitchTarget::ByIndex(tool_index) => Some(IndexSwitchMessage {
				inventory_id: self.inventory_id,
				slot_id: self.slot_id,
				tool_index,
			}),
			SwitchTarget::ByFamily(_) => None,
		}
	}
}

/// Encodes a wire message to bytes.
pub fn encode<T: Serialize>(msg: &T) -> Result<Vec<u8>, WireError> {
	Ok(postcard::to_stdvec(msg)?)
}

/// Decodes a wire message from bytes.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, WireError> {
	Ok(postcard::from_bytes(bytes)?)
}
