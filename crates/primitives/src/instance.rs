//! Concrete tool instances.

use crate::attr::AttrTree;
use crate::id::VariantId;

/// A concrete item: a variant plus its attribute store.
///
/// Owned by the host's inventory representation; the switch core only ever
/// builds fresh instances and copies watched attributes between them.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInstance {
	variant: VariantId,
	attributes: AttrTree,
}

impl ToolInstance {
	/// Creates an instance of `variant` with an empty attribute store.
	pub fn new(variant: VariantId) -> Self {
		Self {
			variant,
			attributes: AttrTree::new(),
		}
	}

	/// Returns the instance's concrete variant.
	#[inline]
	pub fn variant(&self) -> &VariantId {
		&self.variant
	}

	/// Returns the attribute store.
	#[inline]
	pub fn attributes(&self) -> &AttrTree {
		&self.attributes
	}

	/// Returns the attribute store mutably.
	#[inline]
	pub fn attributes_mut(&mut self) -> &mut AttrTree {
		&mut self.attributes
	}
}
