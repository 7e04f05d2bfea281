//! ES256 token generation.
//!
//! [`generate`] is a pure function of its inputs plus the signer: it builds the canonical header
//! and claim segments, signs `header.payload`, and appends the raw signature. [`TokenRequest`] is
//! the builder form with the API's defaults (issued now, valid for twenty minutes, no scope).

pub mod bearer;
pub mod claims;
pub mod signer;

pub use bearer::*;
pub use claims::*;
pub use signer::*;

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::{
	_prelude::*,
	auth::{KeyId, KeyType},
	error::{ConfigError, SigningError},
};

/// Validity applied when none is configured: twenty minutes, the longest the API accepts.
pub const DEFAULT_VALIDITY: Duration = Duration::seconds(1200);

/// Inputs for a single token; defaults match what the API expects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRequest {
	/// Key identifier emitted as `kid`.
	pub key_id: KeyId,
	/// Key scope that selects `iss` or `sub`.
	pub key_type: KeyType,
	/// Issuance instant; `None` means the moment of signing.
	pub issued_at: Option<OffsetDateTime>,
	/// Lifetime added to `iat` to produce `exp`.
	pub validity: Duration,
	/// Optional `scope` claim.
	pub scope: Option<Vec<String>>,
}
impl TokenRequest {
	/// Creates a request with the default validity and no scope.
	pub fn new(key_id: KeyId, key_type: KeyType) -> Self {
		Self { key_id, key_type, issued_at: None, validity: DEFAULT_VALIDITY, scope: None }
	}

	/// Pins the issuance instant.
	pub fn with_issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Overrides the validity window.
	pub fn with_validity(mut self, validity: Duration) -> Self {
		self.validity = validity;

		self
	}

	/// Adds a `scope` claim.
	pub fn with_scope<I, S>(mut self, scope: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scope = Some(scope.into_iter().map(Into::into).collect());

		self
	}

	/// Mints and signs the token.
	pub fn sign<S>(&self, signer: &S) -> Result<BearerToken>
	where
		S: ?Sized + TokenSigner,
	{
		generate(
			&self.key_id,
			&self.key_type,
			signer,
			self.issued_at.unwrap_or_else(OffsetDateTime::now_utc),
			self.validity,
			self.scope.as_deref(),
		)
	}
}

/// Builds `base64url(header).base64url(claims).base64url(signature)`.
///
/// `iat` is the whole-second Unix timestamp of `issued_at` with sub-second precision dropped, and
/// `exp` adds the whole seconds of `validity`. Validity under one second is rejected.
pub fn generate<S>(
	key_id: &KeyId,
	key_type: &KeyType,
	signer: &S,
	issued_at: OffsetDateTime,
	validity: Duration,
	scope: Option<&[String]>,
) -> Result<BearerToken>
where
	S: ?Sized + TokenSigner,
{
	let validity_secs = validity.whole_seconds();

	if validity_secs <= 0 {
		return Err(ConfigError::NonPositiveValidity { seconds: validity_secs }.into());
	}

	let iat = issued_at.unix_timestamp();
	let exp = iat.checked_add(validity_secs).ok_or(ConfigError::ExpiryOutOfRange)?;
	let expires_at =
		OffsetDateTime::from_unix_timestamp(exp).map_err(|_| ConfigError::ExpiryOutOfRange)?;
	let issued_at =
		OffsetDateTime::from_unix_timestamp(iat).map_err(|_| ConfigError::ExpiryOutOfRange)?;
	let header = claims::encode_segment(&JwtHeader::new(key_id))?;
	let payload = claims::encode_segment(&JwtClaims::new(key_type, iat, exp, scope))?;
	let mut token = format!("{header}.{payload}");
	let signature = signer.sign_es256(token.as_bytes())?;

	if signature.len() != ES256_SIGNATURE_LEN {
		return Err(SigningError::InvalidLength {
			expected: ES256_SIGNATURE_LEN,
			actual: signature.len(),
		}
		.into());
	}

	token.push('.');
	token.push_str(&URL_SAFE_NO_PAD.encode(signature));

	Ok(BearerToken::new(token, issued_at, expires_at))
}
