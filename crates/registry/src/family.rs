//! Family registry: grouping of interchangeable variants.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use toolmux_primitives::{FamilyId, VariantId};

use crate::error::RegistryError;
use crate::watch::AttributeWatchList;

/// Maps each family to its ordered member variants.
///
/// Registration order is load-bearing twice over: per family it is the
/// display and tie-break order, and across families the flat list gives the
/// positional addressing used by index-addressed switch requests. A variant
/// belongs to at most one family system-wide; membership never shrinks at
/// runtime.
#[derive(Debug, Default)]
pub struct FamilyRegistry {
	families: IndexMap<FamilyId, Vec<VariantId>>,
	by_variant: FxHashMap<VariantId, FamilyId>,
	order: Vec<VariantId>,
}

impl FamilyRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `variant` as a member of `family`.
	///
	/// Appends the variant to the family's member list (creating the family
	/// on first registration) and forwards each of `watched_keys` to the
	/// watch list. Rejected registrations leave both the registry and the
	/// watch list untouched.
	///
	/// Keys already watched are ignored here; the watch list itself emits
	/// the duplicate diagnostic.
	pub fn register_variant<I, S>(
		&mut self,
		family: FamilyId,
		variant: VariantId,
		watched_keys: I,
		watch: &mut AttributeWatchList,
	) -> Result<(), RegistryError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		if !variant.is_valid() {
			tracing::warn!(
				variant = %variant,
				"cannot register variant; identifier is invalid"
			);
			return Err(RegistryError::InvalidIdentifier(variant.to_string()));
		}

		if let Some(owner) = self.by_variant.get(&variant) {
			tracing::warn!(
				variant = %variant,
				family = %owner,
				"cannot register variant; it is already registered"
			);
			return Err(RegistryError::DuplicateRegistration {
				variant,
				family: owner.clone(),
			});
		}

		tracing::debug!(variant = %variant, family = %family, "registered variant");

		self.families
			.entry(family.clone())
			.or_default()
			.push(variant.clone());
		self.by_variant.insert(variant.clone(), family);
		self.order.push(variant);

		for key in watched_keys {
			let _ = watch.add_key(key);
		}

		Ok(())
	}

	/// Returns the family a variant belongs to, if any.
	#[inline]
	pub fn find_family(&self, variant: &VariantId) -> Option<&FamilyId> {
		self.by_variant.get(variant)
	}

	/// Iterates families in first-registration order.
	pub fn families(&self) -> impl Iterator<Item = &FamilyId> {
		self.families.keys()
	}

	/// Returns a family's members in registration order.
	///
	/// An unknown family yields an empty slice, not an error.
	pub fn variants(&self, family: &FamilyId) -> &[VariantId] {
		self.families.get(family).map_or(&[], Vec::as_slice)
	}

	/// Resolves a family to a concrete member, honoring a preference.
	///
	/// Returns `preferred` when it is a member of `family`, and the
	/// first-registered member otherwise (the preference may predate a
	/// membership change and cannot be trusted blindly). Fails only for a
	/// family with no members, which never happens for a family obtained
	/// via [`families`](Self::families).
	pub fn resolve_variant(
		&self,
		family: &FamilyId,
		preferred: Option<&VariantId>,
	) -> Result<VariantId, RegistryError> {
		let members = self.variants(family);
		let Some(first) = members.first() else {
			return Err(RegistryError::UnknownTarget(family.to_string()));
		};
		match preferred {
			Some(p) if members.contains(p) => Ok(p.clone()),
			_ => Ok(first.clone()),
		}
	}

	/// Returns the variant at `index` in the flat registration order.
	#[inline]
	pub fn variant_at(&self, index: usize) -> Option<&VariantId> {
		self.order.get(index)
	}

	/// Returns a variant's position in the flat registration order.
	pub fn position_of(&self, variant: &VariantId) -> Option<usize> {
		self.order.iter().position(|v| v == variant)
	}

	/// Returns the total number of registered variants.
	#[inline]
	pub fn variant_count(&self) -> usize {
		self.order.len()
	}

	/// Returns the number of families.
	#[inline]
	pub fn family_count(&self) -> usize {
		self.families.len()
	}
}
