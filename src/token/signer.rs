//! ES256 signing seam.

// crates.io
use p256::ecdsa::{Signature, SigningKey, signature::Signer};
// self
use crate::{_prelude::*, error::SigningError};

/// Length of a raw ES256 `r || s` signature.
pub const ES256_SIGNATURE_LEN: usize = 64;

/// Produces raw ES256 signatures over the JWT signing input.
///
/// Implementations must hash with SHA-256 and return the fixed-size `r || s` encoding, not DER.
/// Bring your own implementation to sign with keys held in an HSM or a remote KMS.
pub trait TokenSigner
where
	Self: Send + Sync,
{
	/// Signs `message` and returns the raw signature bytes.
	fn sign_es256(&self, message: &[u8]) -> Result<Vec<u8>, SigningError>;
}
impl TokenSigner for SigningKey {
	fn sign_es256(&self, message: &[u8]) -> Result<Vec<u8>, SigningError> {
		let signature: Signature = self.try_sign(message)?;

		Ok(signature.to_bytes().to_vec())
	}
}
impl<T> TokenSigner for &T
where
	T: ?Sized + TokenSigner,
{
	fn sign_es256(&self, message: &[u8]) -> Result<Vec<u8>, SigningError> {
		(**self).sign_es256(message)
	}
}
impl<T> TokenSigner for Arc<T>
where
	T: ?Sized + TokenSigner,
{
	fn sign_es256(&self, message: &[u8]) -> Result<Vec<u8>, SigningError> {
		(**self).sign_es256(message)
	}
}
