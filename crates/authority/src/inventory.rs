//! In-memory inventory model owned by the authority.

use rustc_hash::FxHashMap;
use toolmux_primitives::ToolInstance;

/// Address of one slot, as carried by requests and handed to hooks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotAddr {
	/// Identifier of the inventory.
	pub inventory_id: String,
	/// Slot within that inventory.
	pub slot_id: i32,
}

/// One inventory slot, possibly empty.
#[derive(Debug, Default)]
pub struct Slot {
	instance: Option<ToolInstance>,
	dirty: bool,
}

impl Slot {
	/// Creates an empty slot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a slot holding `instance`.
	pub fn with_instance(instance: ToolInstance) -> Self {
		Self {
			instance: Some(instance),
			dirty: false,
		}
	}

	/// Returns the held instance, if any.
	#[inline]
	pub fn instance(&self) -> Option<&ToolInstance> {
		self.instance.as_ref()
	}

	/// Returns the held instance mutably, if any.
	#[inline]
	pub fn instance_mut(&mut self) -> Option<&mut ToolInstance> {
		self.instance.as_mut()
	}

	/// Replaces the held instance and marks the slot dirty.
	pub fn replace(&mut self, instance: ToolInstance) {
		self.instance = Some(instance);
		self.dirty = true;
	}

	/// Returns true if the slot's persistent state changed since the last
	/// [`clear_dirty`](Self::clear_dirty).
	#[inline]
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	/// Acknowledges the dirty flag, typically after the host persisted or
	/// broadcast the slot.
	pub fn clear_dirty(&mut self) {
		self.dirty = false;
	}

	/// Returns true if the slot holds no instance.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.instance.is_none()
	}
}

/// A fixed-size run of slots.
#[derive(Debug, Default)]
pub struct Inventory {
	slots: Vec<Slot>,
}

impl Inventory {
	/// Creates an inventory with `len` empty slots.
	pub fn with_slots(len: usize) -> Self {
		Self {
			slots: (0..len).map(|_| Slot::new()).collect(),
		}
	}

	/// Returns the slot with the given wire-level id.
	///
	/// Negative or out-of-range ids yield `None`.
	pub fn slot(&self, slot_id: i32) -> Option<&Slot> {
		usize::try_from(slot_id).ok().and_then(|i| self.slots.get(i))
	}

	/// Returns the slot with the given wire-level id, mutably.
	pub fn slot_mut(&mut self, slot_id: i32) -> Option<&mut Slot> {
		usize::try_from(slot_id)
			.ok()
			.and_then(|i| self.slots.get_mut(i))
	}

	/// Returns the number of slots.
	#[inline]
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// Returns true if the inventory has no slots.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}
}

/// All inventories the authority can address.
#[derive(Debug, Default)]
pub struct InventoryStore {
	inventories: FxHashMap<String, Inventory>,
}

impl InventoryStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces an inventory under `id`.
	pub fn insert(&mut self, id: impl Into<String>, inventory: Inventory) {
		self.inventories.insert(id.into(), inventory);
	}

	/// Removes an inventory.
	pub fn remove(&mut self, id: &str) -> Option<Inventory> {
		self.inventories.remove(id)
	}

	/// Returns the inventory under `id`.
	#[inline]
	pub fn get(&self, id: &str) -> Option<&Inventory> {
		self.inventories.get(id)
	}

	/// Returns the inventory under `id`, mutably.
	#[inline]
	pub fn get_mut(&mut self, id: &str) -> Option<&mut Inventory> {
		self.inventories.get_mut(id)
	}
}
