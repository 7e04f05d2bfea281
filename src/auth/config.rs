//! Token configuration owned by interceptors.

// self
use crate::{
	_prelude::*,
	auth::{KeyId, KeyProvider, KeyType},
};

/// Identity of a token configuration: the `(key_type, key_id)` pair.
///
/// Used as the cache key and as the basis of [`TokenConfig`] equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenIdentity {
	/// Key scope and issuer.
	pub key_type: KeyType,
	/// Key identifier emitted as `kid`.
	pub key_id: KeyId,
}

/// Key identity plus the capability that yields the signing key.
///
/// Equality and hashing consider only `(key_type, key_id)`. Two configurations with the same
/// identity are interchangeable even when their providers differ.
#[derive(Clone, Debug)]
pub struct TokenConfig {
	/// Key identifier emitted as `kid`.
	pub key_id: KeyId,
	/// Key scope and issuer.
	pub key_type: KeyType,
	/// Source of the signing key; excluded from identity.
	pub key_provider: KeyProvider,
}
impl TokenConfig {
	/// Creates a configuration for the provided key.
	pub fn new(key_id: KeyId, key_type: KeyType, key_provider: KeyProvider) -> Self {
		Self { key_id, key_type, key_provider }
	}

	/// Returns the owned identity of this configuration.
	pub fn identity(&self) -> TokenIdentity {
		TokenIdentity { key_type: self.key_type.clone(), key_id: self.key_id.clone() }
	}
}
impl PartialEq for TokenConfig {
	fn eq(&self, other: &Self) -> bool {
		self.key_type == other.key_type && self.key_id == other.key_id
	}
}
impl Eq for TokenConfig {}
impl Hash for TokenConfig {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.key_type.hash(state);
		self.key_id.hash(state);
	}
}
