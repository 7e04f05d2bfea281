//! Identifiers carried in JWT headers and claims.
//!
//! App Store Connect key IDs are short alphanumeric strings (`2X9R4HXF34`) and issuer IDs are
//! UUIDs. Both end up verbatim inside a JSON segment and an HTTP header, so only ASCII
//! alphanumerics, `-`, and `_` are accepted.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

/// Longest identifier accepted; real key and issuer IDs are well below it.
pub const IDENTIFIER_MAX_LEN: usize = 64;

/// Error returned when an identifier is rejected.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// Nothing was supplied.
	#[error("{kind} ID is empty.")]
	Empty {
		/// `Key` or `Issuer`.
		kind: &'static str,
	},
	/// A character outside `[A-Za-z0-9_-]` was found.
	#[error("{kind} ID contains {found:?} at byte {index}.")]
	InvalidCharacter {
		/// `Key` or `Issuer`.
		kind: &'static str,
		/// Offending character.
		found: char,
		/// Byte offset of `found`.
		index: usize,
	},
	/// The identifier is longer than [`IDENTIFIER_MAX_LEN`].
	#[error("{kind} ID is {len} bytes; the limit is {max}.", max = IDENTIFIER_MAX_LEN)]
	TooLong {
		/// `Key` or `Issuer`.
		kind: &'static str,
		/// Supplied length.
		len: usize,
	},
}

fn check(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
	if value.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if let Some((index, found)) =
		value.char_indices().find(|(_, c)| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_')))
	{
		return Err(IdentifierError::InvalidCharacter { kind, found, index });
	}
	if value.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, len: value.len() });
	}

	Ok(())
}

macro_rules! asc_id {
	($(#[$meta:meta])* $name:ident => $kind:literal) => {
		$(#[$meta])*
		#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Validates and wraps `value`.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				Self::try_from(value.into())
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				check($kind, &value).map(|()| Self(value))
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
		impl From<$name> for String {
			fn from(id: $name) -> Self {
				id.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, "{}({})", $kind, self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

asc_id! {
	/// Private key ID, emitted as the JWT `kid` header.
	KeyId => "Key"
}
asc_id! {
	/// Team issuer ID, emitted as the JWT `iss` claim.
	IssuerId => "Issuer"
}
