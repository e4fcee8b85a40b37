//! Application of a validated switch to a slot.

use toolmux_primitives::{AttrTree, FamilyId, PartyId, ToolInstance, VariantId};
use toolmux_registry::{AttributeWatchList, FamilyRegistry};

use crate::inventory::{Slot, SlotAddr};

/// Callback invoked with the acting party and the affected slot.
pub type SwitchHook = Box<dyn Fn(&PartyId, &SlotAddr) + Send + Sync>;

/// Entry within the family-state tree naming the most recently selected
/// variant overall.
pub(crate) const CURRENT_KEY: &str = "current";

/// Applies validated switches to concrete slots.
///
/// Has no failure mode of its own: once validation has produced a target
/// variant, application always succeeds. Switching a slot to the variant it
/// already holds advances the family-preference record but replaces
/// nothing, cues nothing, and fires no hook, which is what makes duplicate
/// requests idempotent without any deduplication machinery.
pub struct SwitchExecutor {
	family_state_key: String,
	play_switch_cue: bool,
	cue: Option<SwitchHook>,
	on_switch_applied: Option<SwitchHook>,
}

impl SwitchExecutor {
	/// Creates an executor recording family preferences under
	/// `family_state_key` in each instance's attribute store.
	///
	/// The key is per-executor configuration rather than a process-wide
	/// constant so independent instances never collide.
	pub fn new(family_state_key: impl Into<String>) -> Self {
		Self {
			family_state_key: family_state_key.into(),
			play_switch_cue: true,
			cue: None,
			on_switch_applied: None,
		}
	}

	/// Enables or disables the audible-cue side effect.
	pub fn switch_cue(mut self, enabled: bool) -> Self {
		self.play_switch_cue = enabled;
		self
	}

	/// Sets the handler delivering the audible cue.
	pub fn cue_handler(mut self, f: impl Fn(&PartyId, &SlotAddr) + Send + Sync + 'static) -> Self {
		self.cue = Some(Box::new(f));
		self
	}

	/// Sets the completion hook, fired after the core's own bookkeeping
	/// (preference record, instance replacement) on every real switch.
	///
	/// Collaborators layer effects such as counters here instead of
	/// wrapping the executor. Never fired on the no-op path.
	pub fn on_switch_applied(
		mut self,
		f: impl Fn(&PartyId, &SlotAddr) + Send + Sync + 'static,
	) -> Self {
		self.on_switch_applied = Some(Box::new(f));
		self
	}

	/// Returns the configured family-state key.
	#[inline]
	pub fn family_state_key(&self) -> &str {
		&self.family_state_key
	}

	/// Applies a switch of `slot` to `target`.
	///
	/// `target` must come from the validation path (it is a registered
	/// variant); an empty slot is left untouched.
	pub fn apply(
		&self,
		registry: &FamilyRegistry,
		watch: &AttributeWatchList,
		sender: &PartyId,
		addr: &SlotAddr,
		slot: &mut Slot,
		target: &VariantId,
	) {
		let Some(current) = slot.instance_mut() else {
			return;
		};
		let family = registry.find_family(target).cloned();

		if current.variant() == target {
			// Re-selecting the current variant still advances the
			// last-selected memory.
			self.record_preference(current.attributes_mut(), family.as_ref(), target);
			tracing::debug!(variant = %target, "switch target already current; nothing to do");
			return;
		}

		let mut next = ToolInstance::new(target.clone());
		for key in watch.keys() {
			if let Some(value) = current.attributes().get(key) {
				next.attributes_mut().set(key, value.clone());
			}
		}
		self.record_preference(next.attributes_mut(), family.as_ref(), target);

		slot.replace(next);
		tracing::debug!(variant = %target, inventory = %addr.inventory_id, slot = addr.slot_id, "switched tool");

		if self.play_switch_cue
			&& let Some(cue) = &self.cue
		{
			cue(sender, addr);
		}
		if let Some(hook) = &self.on_switch_applied {
			hook(sender, addr);
		}
	}

	/// Records `target` as the remembered member of its family and as the
	/// overall most recent selection.
	pub(crate) fn record_preference(
		&self,
		attrs: &mut AttrTree,
		family: Option<&FamilyId>,
		target: &VariantId,
	) {
		let tree = attrs.tree_mut(self.family_state_key.as_str());
		if let Some(family) = family {
			tree.set_str(family.as_str(), target.to_string());
		}
		tree.set_str(CURRENT_KEY, target.to_string());
	}
}
