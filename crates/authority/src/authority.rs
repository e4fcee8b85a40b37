//! Façade tying registry, watch list, inventories, and executor together.

use parking_lot::{Mutex, RwLock};
use toolmux_primitives::{FamilyId, PartyId, ToolInstance, VariantId};
use toolmux_protocol::{SwitchRequest, SwitchTarget};
use toolmux_registry::{AttributeWatchList, FamilyRegistry, RegistryError};

use crate::executor::SwitchExecutor;
use crate::inventory::{InventoryStore, SlotAddr};

/// The authoritative side of the switch protocol.
///
/// Owns the source-of-truth [`FamilyRegistry`] and [`AttributeWatchList`]
/// behind read-write locks (registration happens during a single-threaded
/// startup phase; everything after is read-mostly) and the inventories
/// behind a mutex held across validation and application, so two rapid
/// requests for the same slot cannot interleave between the two.
///
/// [`submit`](Self::submit) is the only mutating entry point reachable from
/// an initiator, and it sends nothing back: an unresolvable request is
/// dropped, leaving a warn-level diagnostic as its only trace.
pub struct Authority {
	registry: RwLock<FamilyRegistry>,
	watch: RwLock<AttributeWatchList>,
	inventories: Mutex<InventoryStore>,
	executor: SwitchExecutor,
}

impl Authority {
	/// Creates an authority around `executor`.
	///
	/// The executor's family-state key is seeded into the watch list, so
	/// the switch-memory record survives switches by construction.
	pub fn new(executor: SwitchExecutor) -> Self {
		let mut watch = AttributeWatchList::new();
		let _ = watch.add_key(executor.family_state_key());
		Self {
			registry: RwLock::new(FamilyRegistry::new()),
			watch: RwLock::new(watch),
			inventories: Mutex::new(InventoryStore::new()),
			executor,
		}
	}

	/// Registers `variant` under `family` and forwards its watched keys.
	///
	/// One collaborator's rejected registration must not block another's
	/// startup; callers log the error and carry on.
	pub fn register_variant<I, S>(
		&self,
		family: FamilyId,
		variant: VariantId,
		watched_keys: I,
	) -> Result<(), RegistryError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut registry = self.registry.write();
		let mut watch = self.watch.write();
		registry.register_variant(family, variant, watched_keys, &mut watch)
	}

	/// Adds a key to the watched-attribute list.
	pub fn add_watched_attribute_key(&self, key: impl Into<String>) -> Result<(), RegistryError> {
		self.watch.write().add_key(key)
	}

	/// Removes a key from the watched-attribute list.
	pub fn remove_watched_attribute_key(&self, key: &str) -> Result<(), RegistryError> {
		self.watch.write().remove_key(key)
	}

	/// Returns the watched keys in insertion order.
	pub fn watched_keys(&self) -> Vec<String> {
		self.watch.read().keys().map(str::to_string).collect()
	}

	/// Returns all families in first-registration order.
	pub fn families(&self) -> Vec<FamilyId> {
		self.registry.read().families().cloned().collect()
	}

	/// Returns a family's members in registration order.
	pub fn variants(&self, family: &FamilyId) -> Vec<VariantId> {
		self.registry.read().variants(family).to_vec()
	}

	/// Returns the family a variant belongs to.
	pub fn find_family(&self, variant: &VariantId) -> Option<FamilyId> {
		self.registry.read().find_family(variant).cloned()
	}

	/// Returns the total number of registered variants.
	pub fn variant_count(&self) -> usize {
		self.registry.read().variant_count()
	}

	/// Returns a variant's position in the flat registration order, which
	/// is what an index-addressed initiator puts on the wire.
	pub fn position_of(&self, variant: &VariantId) -> Option<usize> {
		self.registry.read().position_of(variant)
	}

	/// Returns the member of `family` that switching `instance` into it
	/// would select: the remembered preference if still valid, else the
	/// family's first-registered member.
	///
	/// Read-only; presentation layers use this to label selection entries.
	pub fn remembered_variant(
		&self,
		instance: &ToolInstance,
		family: &FamilyId,
	) -> Option<VariantId> {
		let registry = self.registry.read();
		let preferred = stored_preference(instance, self.executor.family_state_key(), family);
		registry.resolve_variant(family, preferred.as_ref()).ok()
	}

	/// Grants exclusive access to the inventory store.
	///
	/// Hosts use this to install and inspect inventories; the same mutex
	/// serializes request processing.
	pub fn with_inventories<R>(&self, f: impl FnOnce(&mut InventoryStore) -> R) -> R {
		f(&mut self.inventories.lock())
	}

	/// Stamps a freshly created instance with its own family membership and
	/// merges watched attributes from `donors`.
	///
	/// Covers tools that enter the world outside the switch path (crafted,
	/// spawned) so they participate in switch memory from the start.
	pub fn adopt_instance<'a, I>(&self, instance: &mut ToolInstance, donors: I)
	where
		I: IntoIterator<Item = &'a ToolInstance>,
	{
		let registry = self.registry.read();
		let watch = self.watch.read();
		for donor in donors {
			for key in watch.keys() {
				if let Some(value) = donor.attributes().get(key) {
					instance.attributes_mut().set(key, value.clone());
				}
			}
		}
		if let Some(family) = registry.find_family(instance.variant()).cloned() {
			let variant = instance.variant().clone();
			self.executor
				.record_preference(instance.attributes_mut(), Some(&family), &variant);
		}
	}

	/// Processes one switch request on behalf of `sender`.
	///
	/// Validation order: inventory, slot, then target. Any failure drops
	/// the request silently; no response exists in the protocol, so the
	/// initiator learns of success only through the slot changing and of
	/// failure not at all. Validation and application run under one
	/// inventory lock acquisition.
	pub fn submit(&self, sender: &PartyId, request: SwitchRequest) {
		let registry = self.registry.read();
		let watch = self.watch.read();
		let mut inventories = self.inventories.lock();

		let Some(inventory) = inventories.get_mut(&request.inventory_id) else {
			tracing::warn!(
				inventory = %request.inventory_id,
				"dropping switch request; inventory does not exist"
			);
			return;
		};
		let Some(slot) = inventory.slot_mut(request.slot_id) else {
			tracing::warn!(
				inventory = %request.inventory_id,
				slot = request.slot_id,
				"dropping switch request; slot does not exist"
			);
			return;
		};
		let Some(instance) = slot.instance() else {
			tracing::warn!(
				inventory = %request.inventory_id,
				slot = request.slot_id,
				"dropping switch request; slot is empty"
			);
			return;
		};

		let target = match &request.target {
			SwitchTarget::ByFamily(family) => {
				let preferred =
					stored_preference(instance, self.executor.family_state_key(), family);
				match registry.resolve_variant(family, preferred.as_ref()) {
					Ok(target) => target,
					Err(err) => {
						tracing::warn!(family = %family, error = %err, "dropping switch request");
						return;
					}
				}
			}
			SwitchTarget::ByIndex(index) => {
				let resolved = usize::try_from(*index)
					.ok()
					.and_then(|i| registry.variant_at(i))
					.cloned();
				let Some(target) = resolved else {
					tracing::warn!(
						index = *index,
						"dropping switch request; tool index is out of range"
					);
					return;
				};
				target
			}
		};

		let addr = SlotAddr {
			inventory_id: request.inventory_id.clone(),
			slot_id: request.slot_id,
		};
		self.executor
			.apply(&registry, &watch, sender, &addr, slot, &target);
	}
}

/// Reads the preference an instance has recorded for `family`, if any.
///
/// Unparseable stored values are treated as no preference; the registry's
/// tie-break handles the rest.
fn stored_preference(
	instance: &ToolInstance,
	state_key: &str,
	family: &FamilyId,
) -> Option<VariantId> {
	instance
		.attributes()
		.get_tree(state_key)?
		.get_str(family.as_str())?
		.parse()
		.ok()
}
