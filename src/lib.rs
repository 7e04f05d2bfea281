//! ES256 bearer tokens for the App Store Connect API: canonical JWT minting for team and
//! individual keys, plus a request interceptor that signs every outbound call.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod error;
pub mod intercept;
pub mod obs;
pub mod token;
#[cfg(feature = "reqwest")] pub mod transport;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and fixtures for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// crates.io
	use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
	// self
	use crate::auth::{IssuerId, KeyId, KeyType, SigningKey};

	/// Key identifier used by golden-output fixtures.
	pub const TEST_KEY_ID: &str = "ABC1234567";
	/// Issuer identifier used by golden-output fixtures.
	pub const TEST_ISSUER_ID: &str = "DEF7654321";
	/// Issuance instant used by golden-output fixtures.
	pub const TEST_ISSUED_AT: i64 = 1_700_000_000;

	/// Deterministic P-256 key so fixtures stay reproducible across runs.
	pub fn test_signing_key() -> SigningKey {
		SigningKey::from_slice(&[0x11; 32]).expect("Fixed scalar should form a valid P-256 key.")
	}

	/// Alternate deterministic key used to simulate rotation.
	pub fn rotated_signing_key() -> SigningKey {
		SigningKey::from_slice(&[0x22; 32]).expect("Fixed scalar should form a valid P-256 key.")
	}

	/// Fixture key identifier.
	pub fn test_key_id() -> KeyId {
		KeyId::new(TEST_KEY_ID).expect("Fixture key identifier should be valid.")
	}

	/// Fixture team key type.
	pub fn test_team_key() -> KeyType {
		KeyType::team(IssuerId::new(TEST_ISSUER_ID).expect("Fixture issuer should be valid."))
	}

	/// Fixture issuance instant.
	pub fn test_issued_at() -> OffsetDateTime {
		OffsetDateTime::from_unix_timestamp(TEST_ISSUED_AT)
			.expect("Fixture timestamp should be in range.")
	}

	/// Decodes a base64url segment into its UTF-8 JSON text.
	pub fn decode_segment(segment: &str) -> String {
		let bytes = URL_SAFE_NO_PAD.decode(segment).expect("Segment should be valid base64url.");

		String::from_utf8(bytes).expect("Segment should decode to UTF-8 JSON.")
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		hash::{Hash, Hasher},
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use p256;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
