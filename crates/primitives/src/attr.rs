//! Opaque attribute storage carried by tool instances.
//!
//! Values are treated as opaque by the switch machinery: preservation across
//! a switch is a verbatim [`Clone`], never a transformation. The tree shape
//! mirrors the nested attribute stores of typical host engines, which is
//! what lets the family-preference record live inside the same store it is
//! preserved by.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
	/// Signed integer value.
	Int(i64),
	/// String value.
	Str(String),
	/// Raw byte payload.
	Bytes(Vec<u8>),
	/// Nested attribute tree.
	Tree(AttrTree),
}

/// String-keyed map of attribute values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttrTree(BTreeMap<String, AttrValue>);

impl AttrTree {
	/// Creates an empty tree.
	pub fn new() -> Self {
		Self::default()
	}

	/// Looks up a value by key.
	#[inline]
	pub fn get(&self, key: &str) -> Option<&AttrValue> {
		self.0.get(key)
	}

	/// Inserts a value, returning the previous one if present.
	pub fn set(&mut self, key: impl Into<String>, value: AttrValue) -> Option<AttrValue> {
		self.0.insert(key.into(), value)
	}

	/// Removes a value by key.
	pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
		self.0.remove(key)
	}

	/// Returns true if the key is present.
	#[inline]
	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	/// Looks up a string value, ignoring entries of other shapes.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		match self.0.get(key) {
			Some(AttrValue::Str(s)) => Some(s),
			_ => None,
		}
	}

	/// Inserts a string value.
	pub fn set_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.0.insert(key.into(), AttrValue::Str(value.into()));
	}

	/// Looks up an integer value, ignoring entries of other shapes.
	pub fn get_int(&self, key: &str) -> Option<i64> {
		match self.0.get(key) {
			Some(AttrValue::Int(i)) => Some(*i),
			_ => None,
		}
	}

	/// Inserts an integer value.
	pub fn set_int(&mut self, key: impl Into<String>, value: i64) {
		self.0.insert(key.into(), AttrValue::Int(value));
	}

	/// Looks up a nested tree, ignoring entries of other shapes.
	pub fn get_tree(&self, key: &str) -> Option<&AttrTree> {
		match self.0.get(key) {
			Some(AttrValue::Tree(t)) => Some(t),
			_ => None,
		}
	}

	/// Returns the nested tree under `key`, creating it if absent.
	///
	/// A non-tree value already stored under `key` is replaced.
	pub fn tree_mut(&mut self, key: impl Into<String>) -> &mut AttrTree {
		let entry = self
			.0
			.entry(key.into())
			.or_insert_with(|| AttrValue::Tree(AttrTree::new()));
		if !matches!(entry, AttrValue::Tree(_)) {
			*entry = AttrValue::Tree(AttrTree::new());
		}
		match entry {
			AttrValue::Tree(t) => t,
			_ => unreachable!(),
		}
	}

	/// Iterates entries in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Returns the number of entries.
	#[inline]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the tree has no entries.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
