//! Credential shapes that decide which identity claim a token carries.

// self
use crate::{_prelude::*, auth::IssuerId};

/// Subject marker emitted for individual keys.
pub const INDIVIDUAL_SUBJECT: &str = "user";

/// Scope of an API key.
///
/// The variant alone decides whether a token carries `iss` (team keys) or `sub` (individual
/// keys); the two claims never appear together.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum KeyType {
	/// Team key issued under an issuer identifier.
	Team {
		/// Issuer identifier copied into `iss`.
		issuer_id: IssuerId,
	},
	/// Individual key; tokens carry `sub = "user"`.
	Individual,
}
impl KeyType {
	/// Team key for the provided issuer.
	pub fn team(issuer_id: IssuerId) -> Self {
		Self::Team { issuer_id }
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::Team { .. } => "team",
			Self::Individual => "individual",
		}
	}

	/// Issuer identifier for team keys.
	pub fn issuer_id(&self) -> Option<&IssuerId> {
		match self {
			Self::Team { issuer_id } => Some(issuer_id),
			Self::Individual => None,
		}
	}
}
impl Display for KeyType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
