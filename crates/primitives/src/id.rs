//! Identifier types for variants, families, and acting parties.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Domain assumed when parsing a variant identifier without an explicit one.
pub const DEFAULT_DOMAIN: &str = "game";

/// Errors produced when parsing an identifier from its string form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
	/// The domain or path component was empty.
	#[error("variant identifier {0:?} has an empty domain or path")]
	EmptyComponent(String),
}

/// Globally unique identifier for one concrete tool definition.
///
/// Composed of a `domain` (the registering collaborator's namespace) and a
/// `path` within it, both case-sensitive. Displayed as `domain:path`.
/// Construction does not validate; see [`VariantId::is_valid`]. Registries
/// reject invalid identifiers at registration time so that one
/// collaborator's malformed input never aborts another's startup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariantId {
	domain: String,
	path: String,
}

impl VariantId {
	/// Creates a variant identifier from raw components.
	pub fn new(domain: impl Into<String>, path: impl Into<String>) -> Self {
		Self {
			domain: domain.into(),
			path: path.into(),
		}
	}

	/// Returns the domain component.
	#[inline]
	pub fn domain(&self) -> &str {
		&self.domain
	}

	/// Returns the path component.
	#[inline]
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns true if both components are non-empty.
	#[inline]
	pub fn is_valid(&self) -> bool {
		!self.domain.is_empty() && !self.path.is_empty()
	}
}

impl fmt::Display for VariantId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.domain, self.path)
	}
}

impl FromStr for VariantId {
	type Err = IdError;

	/// Parses `domain:path`, or a bare `path` under [`DEFAULT_DOMAIN`].
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (domain, path) = match s.split_once(':') {
			Some((domain, path)) => (domain, path),
			None => (DEFAULT_DOMAIN, s),
		};
		let id = Self::new(domain, path);
		if !id.is_valid() {
			return Err(IdError::EmptyComponent(s.to_string()));
		}
		Ok(id)
	}
}

/// Key naming a group of interchangeable variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FamilyId(String);

impl FamilyId {
	/// Creates a family identifier.
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}

	/// Returns the identifier as a string slice.
	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for FamilyId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for FamilyId {
	fn from(s: &str) -> Self {
		Self::new(s)
	}
}

impl From<String> for FamilyId {
	fn from(s: String) -> Self {
		Self(s)
	}
}

/// Identity of the party a switch is performed on behalf of.
///
/// Supplied by the transport layer alongside each request; the core passes
/// it through to the completion hook untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartyId(String);

impl PartyId {
	/// Creates a party identifier.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Returns the identifier as a string slice.
	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for PartyId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
