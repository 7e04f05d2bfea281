//! Crate-level error types shared by the token generator, key providers, and interceptors.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// Every variant is terminal for the current request attempt; nothing here is retried or replaced
/// with a fallback token.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The key provider could not produce a signing key.
	#[error(transparent)]
	KeyResolution(#[from] KeyResolutionError),
	/// Header, claims, or the header value could not be encoded.
	#[error(transparent)]
	Encoding(#[from] EncodingError),
	/// The ES256 signing operation failed.
	#[error(transparent)]
	Signing(#[from] SigningError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure raised by the bundled HTTP stage.
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Failures raised while resolving the signing key.
#[derive(Debug, ThisError)]
pub enum KeyResolutionError {
	/// The private key file could not be read.
	#[error("Private key file `{path}` could not be read.")]
	Io {
		/// File path handed to the provider.
		path: String,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// The private key is not a valid PKCS#8 P-256 key.
	#[error("Private key is not a valid PKCS#8 P-256 key.")]
	InvalidKey(#[from] p256::pkcs8::Error),
	/// A caller-supplied provider failed.
	#[error("Key provider failed: {source}")]
	Provider {
		/// Provider-specific failure.
		#[source]
		source: BoxError,
	},
}
impl KeyResolutionError {
	/// Wraps a caller-supplied provider failure.
	pub fn provider(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Provider { source: Box::new(src) }
	}
}

/// Serialization failures for the token or the outgoing header.
#[derive(Debug, ThisError)]
pub enum EncodingError {
	/// Header or claims could not be serialized to JSON.
	#[error("JWT segment could not be serialized.")]
	Json(#[from] serde_json::Error),
	/// The bearer token is not a valid HTTP header value.
	#[error("Bearer token is not a valid header value.")]
	HeaderValue(#[from] http::header::InvalidHeaderValue),
}

/// Failures raised by the ES256 signing primitive.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// The ECDSA primitive rejected the operation.
	#[error("ES256 signing failed.")]
	Ecdsa(#[from] p256::ecdsa::Error),
	/// A custom signer failed.
	#[error("Token signer failed: {source}")]
	Signer {
		/// Signer-specific failure.
		#[source]
		source: BoxError,
	},
	/// The signer returned something other than a raw `r || s` signature.
	#[error("ES256 signatures must be {expected} bytes, got {actual}.")]
	InvalidLength {
		/// Required signature length.
		expected: usize,
		/// Length returned by the signer.
		actual: usize,
	},
}
impl SigningError {
	/// Wraps a custom signer failure.
	pub fn signer(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Signer { source: Box::new(src) }
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Validity must be at least one whole second.
	#[error("Token validity must be positive, got {seconds} seconds.")]
	NonPositiveValidity {
		/// Whole seconds supplied by the caller.
		seconds: i64,
	},
	/// `iat + validity` overflowed the timestamp range.
	#[error("Token expiry exceeds the supported range.")]
	ExpiryOutOfRange,
	/// Identifier failed validation.
	#[error(transparent)]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
	/// Credentials JSON could not be parsed.
	#[error("Credentials are malformed.")]
	CredentialsParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Credentials must name exactly one key source.
	#[error("Credentials must set exactly one of private_key or private_key_path.")]
	AmbiguousKeySource,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request URI could not be joined with the base URL.
	#[error("Request URL is invalid.")]
	InvalidUrl(#[from] url::ParseError),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
