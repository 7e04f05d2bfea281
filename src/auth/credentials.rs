//! Serializable credential records that turn into [`TokenConfig`]s.

// std
use std::path::PathBuf;
// self
use crate::{
	_prelude::*,
	auth::{IssuerId, KeyId, KeyProvider, KeyType, TokenConfig},
	error::ConfigError,
};

/// API key credentials as stored in configuration files.
///
/// `issuer_id` present selects a team key; absent selects an individual key. Exactly one of
/// `private_key` (inline PEM) or `private_key_path` must be set.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
	/// Key identifier emitted as `kid`.
	pub key_id: KeyId,
	/// Issuer identifier for team keys.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub issuer_id: Option<IssuerId>,
	/// Inline PKCS#8 PEM.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub private_key: Option<String>,
	/// Path to a `.p8` file, re-read on every resolution.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub private_key_path: Option<PathBuf>,
}
impl Credentials {
	/// Parses credentials from JSON, reporting the failing field path on error.
	pub fn from_json_str(raw: &str) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_str(raw);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ConfigError::CredentialsParse { source }.into())
	}

	/// Key type implied by the presence of an issuer.
	pub fn key_type(&self) -> KeyType {
		match &self.issuer_id {
			Some(issuer_id) => KeyType::team(issuer_id.clone()),
			None => KeyType::Individual,
		}
	}

	/// Builds the token configuration, parsing inline keys eagerly.
	pub fn into_config(self) -> Result<TokenConfig> {
		let key_type = self.key_type();
		let provider = match (self.private_key, self.private_key_path) {
			(Some(pem), None) => KeyProvider::from_pkcs8_pem(&pem)?,
			(None, Some(path)) => KeyProvider::from_pem_file(path),
			_ => return Err(ConfigError::AmbiguousKeySource.into()),
		};

		Ok(TokenConfig::new(self.key_id, key_type, provider))
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("key_id", &self.key_id)
			.field("issuer_id", &self.issuer_id)
			.field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
			.field("private_key_path", &self.private_key_path)
			.finish()
	}
}
