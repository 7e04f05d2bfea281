//! Optional observability helpers for token issuance.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap each interception in a span named `asc_auth.token` with the
//!   `key_type` and `stage` (operation id) fields. Token material is never recorded.
//! - Enable `metrics` to increment the `asc_auth_token_total` counter for every attempt, success,
//!   failure, and cache hit, labeled by `key_type` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each token issuance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenOutcome {
	/// Entry to the interceptor.
	Attempt,
	/// A token was minted and attached.
	Success,
	/// Key resolution, encoding, or signing failed.
	Failure,
	/// A cached token was attached instead of minting.
	CacheHit,
}
impl TokenOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenOutcome::Attempt => "attempt",
			TokenOutcome::Success => "success",
			TokenOutcome::Failure => "failure",
			TokenOutcome::CacheHit => "cache_hit",
		}
	}
}
impl Display for TokenOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
