//! Opt-in, time-bounded token cache.
//!
//! Interceptors mint a fresh token per request unless a [`TokenCache`] is attached. When one is,
//! tokens are shared per [`TokenIdentity`] and reused only while they stay valid for at least the
//! reuse margin, so a cached token is never attached at or past its `exp`.

// self
use crate::{_prelude::*, auth::TokenIdentity, token::BearerToken};

type CacheMap = Arc<RwLock<HashMap<TokenIdentity, BearerToken>>>;

/// Thread-safe token cache keyed by `(key_type, key_id)`.
#[derive(Clone, Debug)]
pub struct TokenCache {
	map: CacheMap,
	reuse_margin: Duration,
}
impl TokenCache {
	/// Margin applied when none is configured.
	pub const DEFAULT_REUSE_MARGIN: Duration = Duration::seconds(60);

	/// Creates an empty cache with the default margin.
	pub fn new() -> Self {
		Self { map: Default::default(), reuse_margin: Self::DEFAULT_REUSE_MARGIN }
	}

	/// Overrides the minimum remaining lifetime a cached token needs to be reused.
	pub fn with_reuse_margin(mut self, margin: Duration) -> Self {
		self.reuse_margin = if margin.is_negative() { Duration::ZERO } else { margin };

		self
	}

	/// Returns a cached token that remains usable at `now`.
	pub fn get(&self, identity: &TokenIdentity, now: OffsetDateTime) -> Option<BearerToken> {
		self.map.read().get(identity).filter(|token| self.is_reusable(token, now)).cloned()
	}

	/// Stores `token`, replacing any previous entry for `identity`.
	pub fn insert(&self, identity: TokenIdentity, token: BearerToken) {
		self.map.write().insert(identity, token);
	}

	/// Drops the entry for `identity`.
	pub fn invalidate(&self, identity: &TokenIdentity) -> Option<BearerToken> {
		self.map.write().remove(identity)
	}

	/// Drops every entry that is no longer reusable at `now`.
	pub fn purge_expired(&self, now: OffsetDateTime) {
		self.map.write().retain(|_, token| self.is_reusable(token, now));
	}

	/// Number of cached identities.
	pub fn len(&self) -> usize {
		self.map.read().len()
	}

	/// Returns true if nothing is cached.
	pub fn is_empty(&self) -> bool {
		self.map.read().is_empty()
	}

	fn is_reusable(&self, token: &BearerToken, now: OffsetDateTime) -> bool {
		// A margin reaching past the representable range leaves nothing reusable.
		let Some(deadline) = now.checked_add(self.reuse_margin) else { return false };

		token.issued_at <= now && !token.is_expired_at(deadline)
	}
}
impl Default for TokenCache {
	fn default() -> Self {
		Self::new()
	}
}
