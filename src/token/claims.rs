//! JWT header and claim sets with canonical JSON encoding.
//!
//! Fields are declared in lexicographic order and `serde_json` keeps declaration order, so the
//! serialized objects have sorted keys. `serde_json` never escapes `/`, which covers the other
//! half of the canonical form. Tokens minted from identical inputs are therefore byte-identical up
//! to the signature.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::{
	_prelude::*,
	auth::{INDIVIDUAL_SUBJECT, KeyType},
	error::EncodingError,
};

/// Signing algorithm advertised in every header.
pub const ALGORITHM: &str = "ES256";
/// Token type advertised in every header.
pub const TOKEN_TYPE: &str = "JWT";
/// Audience expected by the API.
pub const AUDIENCE: &str = "appstoreconnect-v1";

/// JOSE header: `{"alg":"ES256","kid":<key_id>,"typ":"JWT"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JwtHeader<'a> {
	/// Always [`ALGORITHM`].
	pub alg: &'a str,
	/// Key identifier.
	pub kid: &'a str,
	/// Always [`TOKEN_TYPE`].
	pub typ: &'a str,
}
impl<'a> JwtHeader<'a> {
	/// Header for the provided key identifier.
	pub fn new(kid: &'a str) -> Self {
		Self { alg: ALGORITHM, kid, typ: TOKEN_TYPE }
	}
}

/// Claim set; exactly one of `iss`/`sub` is populated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JwtClaims<'a> {
	/// Always [`AUDIENCE`].
	pub aud: &'a str,
	/// Expiry, whole seconds since the Unix epoch.
	pub exp: i64,
	/// Issuance, whole seconds since the Unix epoch.
	pub iat: i64,
	/// Issuer for team keys.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub iss: Option<&'a str>,
	/// Optional request scope.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scope: Option<&'a [String]>,
	/// Subject marker for individual keys.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sub: Option<&'a str>,
}
impl<'a> JwtClaims<'a> {
	/// Selects the identity claim from `key_type` and fills the fixed claims.
	pub fn new(key_type: &'a KeyType, iat: i64, exp: i64, scope: Option<&'a [String]>) -> Self {
		let (iss, sub) = match key_type {
			KeyType::Team { issuer_id } => (Some(issuer_id.as_ref()), None),
			KeyType::Individual => (None, Some(INDIVIDUAL_SUBJECT)),
		};

		Self { aud: AUDIENCE, exp, iat, iss, scope, sub }
	}
}

/// Serializes `value` to compact JSON and encodes it as unpadded base64url.
pub fn encode_segment<T>(value: &T) -> Result<String, EncodingError>
where
	T: ?Sized + Serialize,
{
	let json = serde_json::to_vec(value)?;

	Ok(URL_SAFE_NO_PAD.encode(json))
}
