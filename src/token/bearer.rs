//! Minted bearer tokens that redact their value in logs.

// self
use crate::_prelude::*;

/// Compact ES256 JWT plus the instants it was minted for.
///
/// The token value never appears in `Debug` or `Display` output.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
	value: String,
	/// `iat` claim as an instant.
	pub issued_at: OffsetDateTime,
	/// `exp` claim as an instant.
	pub expires_at: OffsetDateTime,
}
impl BearerToken {
	pub(crate) fn new(value: String, issued_at: OffsetDateTime, expires_at: OffsetDateTime) -> Self {
		Self { value, issued_at, expires_at }
	}

	/// Returns the compact `header.payload.signature` string. Callers must avoid logging it.
	pub fn expose(&self) -> &str {
		&self.value
	}

	/// Returns the `Authorization` header value, `Bearer <token>`.
	pub fn authorization(&self) -> String {
		format!("Bearer {}", self.value)
	}

	/// Returns `true` once `instant` reaches the expiry.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.expires_at
	}

	/// Splits the token into its header, payload, and signature segments.
	pub fn segments(&self) -> Option<(&str, &str, &str)> {
		let mut parts = self.value.splitn(3, '.');

		Some((parts.next()?, parts.next()?, parts.next()?))
	}
}
impl AsRef<str> for BearerToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BearerToken")
			.field("value", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
impl Display for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
