//! Registration and resolution errors.

use thiserror::Error;
use toolmux_primitives::{FamilyId, VariantId};

/// Errors reported by the registry and watch list.
///
/// All of these are local to the failing call: a collaborator whose
/// registration is rejected keeps running, and other collaborators are
/// unaffected. Nothing here is fatal to the host process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
	/// The variant identifier is malformed or has empty components.
	#[error("invalid variant identifier: {0:?}")]
	InvalidIdentifier(String),

	/// The variant is already claimed by a family.
	#[error("variant {variant} is already registered under family {family}")]
	DuplicateRegistration {
		/// The variant whose registration was rejected.
		variant: VariantId,
		/// The family that already owns it.
		family: FamilyId,
	},

	/// A switch target could not be resolved to a registered variant.
	#[error("no resolvable variant for target {0:?}")]
	UnknownTarget(String),

	/// The attribute key is already on the watch list.
	///
	/// Reported, not fatal: multiple collaborators may legitimately attempt
	/// to register the same key.
	#[error("attribute key {0:?} is already watched")]
	AlreadyWatched(String),

	/// The attribute key is not on the watch list.
	#[error("attribute key {0:?} is not watched")]
	NotWatched(String),
}
