//! End-to-end scenarios across registry, protocol, and executor.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use toolmux_primitives::{FamilyId, PartyId, ToolInstance, VariantId};
use toolmux_protocol::SwitchRequest;

use crate::Authority;
use crate::executor::SwitchExecutor;
use crate::inventory::{Inventory, Slot};

const STATE_KEY: &str = "test:multitool";

fn vid(s: &str) -> VariantId {
	s.parse().unwrap()
}

fn fam(s: &str) -> FamilyId {
	FamilyId::new(s)
}

fn party() -> PartyId {
	PartyId::new("player-1")
}

struct Fixture {
	authority: Authority,
	switches: Arc<AtomicUsize>,
	cues: Arc<AtomicUsize>,
}

impl Fixture {
	/// Clones the instance in the hotbar's first slot.
	fn held(&self) -> ToolInstance {
		self.authority.with_inventories(|inv| {
			inv.get("hotbar")
				.unwrap()
				.slot(0)
				.unwrap()
				.instance()
				.unwrap()
				.clone()
		})
	}

	fn held_is_dirty(&self) -> bool {
		self.authority
			.with_inventories(|inv| inv.get("hotbar").unwrap().slot(0).unwrap().is_dirty())
	}
}

fn fixture() -> Fixture {
	fixture_with(|executor| executor)
}

fn fixture_with(configure: impl FnOnce(SwitchExecutor) -> SwitchExecutor) -> Fixture {
	let switches = Arc::new(AtomicUsize::new(0));
	let cues = Arc::new(AtomicUsize::new(0));

	let executor = configure(
		SwitchExecutor::new(STATE_KEY)
			.cue_handler({
				let cues = cues.clone();
				move |_, _| {
					cues.fetch_add(1, Ordering::SeqCst);
				}
			})
			.on_switch_applied({
				let switches = switches.clone();
				move |_, _| {
					switches.fetch_add(1, Ordering::SeqCst);
				}
			}),
	);

	let authority = Authority::new(executor);
	authority
		.register_variant(fam("hammer"), vid("mod:hammer-basic"), ["durability"])
		.unwrap();
	authority
		.register_variant(fam("hammer"), vid("mod:hammer-advanced"), Vec::<String>::new())
		.unwrap();
	authority
		.register_variant(fam("saw"), vid("mod:saw"), Vec::<String>::new())
		.unwrap();

	authority.with_inventories(|inv| {
		let mut hotbar = Inventory::with_slots(2);
		*hotbar.slot_mut(0).unwrap() =
			Slot::with_instance(ToolInstance::new(vid("mod:hammer-basic")));
		inv.insert("hotbar", hotbar);
	});

	Fixture {
		authority,
		switches,
		cues,
	}
}

#[test]
fn family_switch_without_preference_is_a_noop() {
	let fx = fixture();

	fx.authority
		.submit(&party(), SwitchRequest::by_family("hotbar", 0, fam("hammer")));

	// Resolves to the first member, which the slot already holds.
	let held = fx.held();
	assert_eq!(held.variant(), &vid("mod:hammer-basic"));
	assert_eq!(fx.switches.load(Ordering::SeqCst), 0);
	assert_eq!(fx.cues.load(Ordering::SeqCst), 0);
	assert!(!fx.held_is_dirty());

	// The last-selected memory still advances on the no-op path.
	let record = held.attributes().get_tree(STATE_KEY).unwrap();
	assert_eq!(record.get_str("hammer"), Some("mod:hammer-basic"));
	assert_eq!(record.get_str("current"), Some("mod:hammer-basic"));
}

#[test]
fn index_switch_replaces_instance_and_fires_hook_once() {
	let fx = fixture();
	let index = fx
		.authority
		.position_of(&vid("mod:hammer-advanced"))
		.unwrap();

	let request = SwitchRequest::by_index("hotbar", 0, i32::try_from(index).unwrap());
	fx.authority.submit(&party(), request.clone());

	let held = fx.held();
	assert_eq!(held.variant(), &vid("mod:hammer-advanced"));
	assert_eq!(fx.switches.load(Ordering::SeqCst), 1);
	assert_eq!(fx.cues.load(Ordering::SeqCst), 1);
	assert!(fx.held_is_dirty());

	let record = held.attributes().get_tree(STATE_KEY).unwrap();
	assert_eq!(record.get_str("hammer"), Some("mod:hammer-advanced"));

	// A duplicate of the same request re-validates and lands on the no-op
	// path; nothing fires twice.
	fx.authority.submit(&party(), request);
	assert_eq!(fx.switches.load(Ordering::SeqCst), 1);
	assert_eq!(fx.cues.load(Ordering::SeqCst), 1);
}

#[test]
fn family_switch_follows_stored_preference() {
	let fx = fixture();
	fx.authority.with_inventories(|inv| {
		let slot = inv.get_mut("hotbar").unwrap().slot_mut(0).unwrap();
		slot.instance_mut()
			.unwrap()
			.attributes_mut()
			.tree_mut(STATE_KEY)
			.set_str("hammer", "mod:hammer-advanced");
	});

	fx.authority
		.submit(&party(), SwitchRequest::by_family("hotbar", 0, fam("hammer")));

	assert_eq!(fx.held().variant(), &vid("mod:hammer-advanced"));
	assert_eq!(fx.switches.load(Ordering::SeqCst), 1);
}

#[test]
fn watched_attributes_survive_and_unwatched_do_not() {
	let fx = fixture();
	fx.authority.with_inventories(|inv| {
		let slot = inv.get_mut("hotbar").unwrap().slot_mut(0).unwrap();
		let attrs = slot.instance_mut().unwrap().attributes_mut();
		attrs.set_int("durability", 37);
		attrs.set_str("scratch", "not watched");
	});

	let index = fx
		.authority
		.position_of(&vid("mod:hammer-advanced"))
		.unwrap();
	fx.authority.submit(
		&party(),
		SwitchRequest::by_index("hotbar", 0, i32::try_from(index).unwrap()),
	);

	let held = fx.held();
	assert_eq!(held.variant(), &vid("mod:hammer-advanced"));
	assert_eq!(held.attributes().get_int("durability"), Some(37));
	assert!(!held.attributes().contains_key("scratch"));
}

#[test]
fn missing_inventory_slot_or_instance_drops_silently() {
	let fx = fixture();
	let before = fx.held();

	// Unknown inventory.
	fx.authority
		.submit(&party(), SwitchRequest::by_family("ghost", 0, fam("hammer")));
	// Slot id past the end of the inventory.
	fx.authority
		.submit(&party(), SwitchRequest::by_family("hotbar", 99, fam("hammer")));
	// Negative slot id.
	fx.authority
		.submit(&party(), SwitchRequest::by_family("hotbar", -1, fam("hammer")));
	// Existing but empty slot.
	fx.authority
		.submit(&party(), SwitchRequest::by_family("hotbar", 1, fam("hammer")));

	assert_eq!(fx.held(), before);
	assert_eq!(fx.switches.load(Ordering::SeqCst), 0);
	assert_eq!(fx.cues.load(Ordering::SeqCst), 0);
}

#[test]
fn unresolvable_targets_drop_silently() {
	let fx = fixture();
	let before = fx.held();
	let count = i32::try_from(fx.authority.variant_count()).unwrap();

	fx.authority
		.submit(&party(), SwitchRequest::by_index("hotbar", 0, count));
	fx.authority
		.submit(&party(), SwitchRequest::by_index("hotbar", 0, -1));
	fx.authority
		.submit(&party(), SwitchRequest::by_family("hotbar", 0, fam("chisel")));

	assert_eq!(fx.held(), before);
	assert_eq!(fx.switches.load(Ordering::SeqCst), 0);
}

#[test]
fn cue_flag_gates_the_cue_but_not_the_hook() {
	let fx = fixture_with(|executor| executor.switch_cue(false));
	let index = fx
		.authority
		.position_of(&vid("mod:hammer-advanced"))
		.unwrap();

	fx.authority.submit(
		&party(),
		SwitchRequest::by_index("hotbar", 0, i32::try_from(index).unwrap()),
	);

	assert_eq!(fx.switches.load(Ordering::SeqCst), 1);
	assert_eq!(fx.cues.load(Ordering::SeqCst), 0);
}

#[test]
fn family_state_key_is_watched_from_construction() {
	let fx = fixture();
	assert_eq!(fx.authority.watched_keys()[0], STATE_KEY);

	// Preservation by construction: switch away and back, the record
	// travels with the instance both times.
	let advanced = fx
		.authority
		.position_of(&vid("mod:hammer-advanced"))
		.unwrap();
	let basic = fx.authority.position_of(&vid("mod:hammer-basic")).unwrap();
	fx.authority.submit(
		&party(),
		SwitchRequest::by_index("hotbar", 0, i32::try_from(advanced).unwrap()),
	);
	fx.authority.submit(
		&party(),
		SwitchRequest::by_index("hotbar", 0, i32::try_from(basic).unwrap()),
	);

	let record = fx.held().attributes().get_tree(STATE_KEY).unwrap().clone();
	assert_eq!(record.get_str("hammer"), Some("mod:hammer-basic"));

	// Removing the key is allowed; guarding against the resulting loss of
	// switch memory is the collaborator's problem, not this layer's.
	assert!(fx.authority.remove_watched_attribute_key(STATE_KEY).is_ok());
}

#[test]
fn remembered_variant_tracks_switches() {
	let fx = fixture();
	let held = fx.held();
	assert_eq!(
		fx.authority.remembered_variant(&held, &fam("hammer")),
		Some(vid("mod:hammer-basic"))
	);

	let index = fx
		.authority
		.position_of(&vid("mod:hammer-advanced"))
		.unwrap();
	fx.authority.submit(
		&party(),
		SwitchRequest::by_index("hotbar", 0, i32::try_from(index).unwrap()),
	);

	let held = fx.held();
	assert_eq!(
		fx.authority.remembered_variant(&held, &fam("hammer")),
		Some(vid("mod:hammer-advanced"))
	);
	assert_eq!(fx.authority.remembered_variant(&held, &fam("chisel")), None);
}

#[test]
fn adopt_instance_merges_donors_and_stamps_membership() {
	let fx = fixture();

	let mut donor = ToolInstance::new(vid("mod:hammer-basic"));
	donor.attributes_mut().set_int("durability", 12);
	donor.attributes_mut().set_str("scratch", "unwatched");

	let mut crafted = ToolInstance::new(vid("mod:hammer-advanced"));
	fx.authority.adopt_instance(&mut crafted, [&donor]);

	assert_eq!(crafted.attributes().get_int("durability"), Some(12));
	assert!(!crafted.attributes().contains_key("scratch"));
	let record = crafted.attributes().get_tree(STATE_KEY).unwrap();
	assert_eq!(record.get_str("hammer"), Some("mod:hammer-advanced"));
}

#[test]
fn hook_receives_party_and_slot_address() {
	let seen: Arc<parking_lot::Mutex<Vec<(String, String, i32)>>> =
		Arc::new(parking_lot::Mutex::new(Vec::new()));
	let executor = SwitchExecutor::new(STATE_KEY).on_switch_applied({
		let seen = seen.clone();
		move |party, addr| {
			seen.lock()
				.push((party.to_string(), addr.inventory_id.clone(), addr.slot_id));
		}
	});

	let authority = Authority::new(executor);
	authority
		.register_variant(fam("hammer"), vid("mod:hammer-basic"), Vec::<String>::new())
		.unwrap();
	authority
		.register_variant(fam("hammer"), vid("mod:hammer-advanced"), Vec::<String>::new())
		.unwrap();
	authority.with_inventories(|inv| {
		let mut hotbar = Inventory::with_slots(1);
		*hotbar.slot_mut(0).unwrap() =
			Slot::with_instance(ToolInstance::new(vid("mod:hammer-basic")));
		inv.insert("hotbar", hotbar);
	});

	let index = authority.position_of(&vid("mod:hammer-advanced")).unwrap();
	authority.submit(
		&PartyId::new("steve"),
		SwitchRequest::by_index("hotbar", 0, i32::try_from(index).unwrap()),
	);

	assert_eq!(&*seen.lock(), &[("steve".to_string(), "hotbar".to_string(), 0)]);
}
