//! Request interception that signs every outbound call.
//!
//! [`AuthorizationInterceptor`] sits in a request pipeline. For each request it resolves the
//! signing key, mints a token valid for twenty minutes, replaces the `Authorization` header with
//! `Bearer <token>`, and hands the request to the next stage. Responses pass through untouched.
//!
//! Nothing leaves the interceptor before the header is set: a key or signing failure aborts the
//! call before [`Next::run`] is invoked.

// crates.io
use http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	auth::TokenConfig,
	cache::TokenCache,
	obs::{self, TokenOutcome, TokenSpan},
	token::{self, BearerToken, DEFAULT_VALIDITY},
};

/// Request head handed between pipeline stages; the body travels separately.
pub type HttpRequest = http::Request<()>;

/// Remaining pipeline invoked after the interceptor.
///
/// Implemented for any `FnOnce(HttpRequest, Option<B>, Url) -> impl Future` whose error type can
/// absorb [`Error`], so closures and transports plug in alike.
pub trait Next<B>
where
	Self: Send,
{
	/// Response produced by the pipeline.
	type Response;
	/// Pipeline error; must be able to carry interceptor failures.
	type Error: From<Error>;

	/// Forwards the request to the rest of the pipeline.
	fn run(
		self,
		request: HttpRequest,
		body: Option<B>,
		base_url: Url,
	) -> impl Future<Output = Result<(Self::Response, Option<B>), Self::Error>> + Send;
}
impl<F, Fut, B, R, E> Next<B> for F
where
	F: Send + FnOnce(HttpRequest, Option<B>, Url) -> Fut,
	Fut: Send + Future<Output = Result<(R, Option<B>), E>>,
	E: From<Error>,
{
	type Error = E;
	type Response = R;

	fn run(
		self,
		request: HttpRequest,
		body: Option<B>,
		base_url: Url,
	) -> impl Future<Output = Result<(R, Option<B>), E>> + Send {
		self(request, body, base_url)
	}
}

/// Pipeline stage that attaches `Authorization: Bearer <token>`.
///
/// Equality and hashing follow the wrapped [`TokenConfig`]: two interceptors for the same
/// `(key_type, key_id)` are interchangeable regardless of their key providers or caches.
#[derive(Clone, Debug)]
pub struct AuthorizationInterceptor {
	config: TokenConfig,
	cache: Option<TokenCache>,
}
impl AuthorizationInterceptor {
	/// Validity of every token minted by the interceptor.
	pub const VALIDITY: Duration = DEFAULT_VALIDITY;

	/// Creates an interceptor that mints a fresh token per request.
	pub fn new(config: TokenConfig) -> Self {
		Self { config, cache: None }
	}

	/// Shares tokens through `cache` instead of minting one per request.
	pub fn with_cache(mut self, cache: TokenCache) -> Self {
		self.cache = Some(cache);

		self
	}

	/// Configuration backing this interceptor.
	pub fn config(&self) -> &TokenConfig {
		&self.config
	}

	/// Resolves the key and mints a token issued at the current instant.
	pub fn bearer_token(&self) -> Result<BearerToken> {
		self.bearer_token_at(OffsetDateTime::now_utc())
	}

	/// Resolves the key and mints a token issued at `now`.
	pub fn bearer_token_at(&self, now: OffsetDateTime) -> Result<BearerToken> {
		let key_type = &self.config.key_type;

		obs::record_token_outcome(key_type, TokenOutcome::Attempt);

		if let Some(token) = self.cache.as_ref().and_then(|c| c.get(&self.config.identity(), now))
		{
			obs::record_token_outcome(key_type, TokenOutcome::CacheHit);

			return Ok(token);
		}

		match self.mint(now) {
			Ok(token) => {
				if let Some(cache) = &self.cache {
					cache.insert(self.config.identity(), token.clone());
				}

				obs::record_token_outcome(key_type, TokenOutcome::Success);

				Ok(token)
			},
			Err(e) => {
				obs::record_token_outcome(key_type, TokenOutcome::Failure);

				Err(e)
			},
		}
	}

	/// Replaces every `Authorization` value in `headers` with a fresh bearer token.
	pub fn authorize_headers(&self, headers: &mut HeaderMap) -> Result<()> {
		let token = self.bearer_token()?;
		let mut value = HeaderValue::from_str(&token.authorization())
			.map_err(crate::error::EncodingError::from)?;

		value.set_sensitive(true);
		headers.insert(AUTHORIZATION, value);

		Ok(())
	}

	/// Authorizes `request` and forwards it, with the original body and base URL, to `next`.
	///
	/// `operation_id` only labels the tracing span. Errors from key resolution or signing are
	/// returned without calling `next`; whatever `next` returns is passed through unchanged.
	pub async fn intercept<B, N>(
		&self,
		mut request: HttpRequest,
		body: Option<B>,
		base_url: Url,
		operation_id: &str,
		next: N,
	) -> Result<(N::Response, Option<B>), N::Error>
	where
		N: Next<B>,
	{
		let span = TokenSpan::new(&self.config.key_type, operation_id);

		span.instrument(async move {
			match self.authorize_headers(request.headers_mut()) {
				Ok(()) => next.run(request, body, base_url).await,
				Err(e) => Err(e.into()),
			}
		})
		.await
	}

	fn mint(&self, now: OffsetDateTime) -> Result<BearerToken> {
		let TokenConfig { key_id, key_type, key_provider } = &self.config;
		let key = key_provider.resolve()?;

		token::generate(key_id, key_type, &key, now, Self::VALIDITY, None)
	}
}
impl From<TokenConfig> for AuthorizationInterceptor {
	fn from(config: TokenConfig) -> Self {
		Self::new(config)
	}
}
impl PartialEq for AuthorizationInterceptor {
	fn eq(&self, other: &Self) -> bool {
		self.config == other.config
	}
}
impl Eq for AuthorizationInterceptor {}
impl Hash for AuthorizationInterceptor {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.config.hash(state);
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{
		collections::{HashSet, hash_map::DefaultHasher},
		sync::atomic::{AtomicUsize, Ordering},
	};
	// self
	use super::*;
	use crate::{
		_preludet::*,
		auth::{IssuerId, KeyId, KeyProvider, KeyType},
		error::KeyResolutionError,
	};

	type Seen = (HttpRequest, Url);

	fn interceptor(key_type: KeyType, provider: KeyProvider) -> AuthorizationInterceptor {
		AuthorizationInterceptor::new(TokenConfig::new(test_key_id(), key_type, provider))
	}

	fn counting_provider(calls: Arc<AtomicUsize>) -> KeyProvider {
		KeyProvider::from_fn(move || {
			calls.fetch_add(1, Ordering::SeqCst);

			Ok(test_signing_key())
		})
	}

	fn base_url() -> Url {
		Url::parse("https://api.appstoreconnect.apple.com/").expect("Base URL should parse.")
	}

	fn request() -> HttpRequest {
		http::Request::builder()
			.uri("/v1/apps")
			.header(AUTHORIZATION, "Bearer stale")
			.body(())
			.expect("Fixture request should build.")
	}

	async fn run_spy(
		interceptor: &AuthorizationInterceptor,
		request: HttpRequest,
		calls: Arc<AtomicUsize>,
	) -> Result<(Seen, Option<Vec<u8>>)> {
		interceptor
			.intercept(
				request,
				Some(b"{}".to_vec()),
				base_url(),
				"apps_getCollection",
				move |request: HttpRequest, body: Option<Vec<u8>>, base_url: Url| async move {
					calls.fetch_add(1, Ordering::SeqCst);

					Ok::<_, Error>(((request, base_url), body))
				},
			)
			.await
	}

	fn assert_bearer_shape(value: &str) {
		let token = value.strip_prefix("Bearer ").expect("Header should use the Bearer scheme.");
		let segments = token.split('.').collect::<Vec<_>>();

		assert_eq!(segments.len(), 3, "Token must have exactly three segments.");

		for segment in segments {
			assert!(!segment.is_empty());
			assert!(segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
		}
	}

	fn hash_of(value: &AuthorizationInterceptor) -> u64 {
		let mut hasher = DefaultHasher::new();

		value.hash(&mut hasher);

		hasher.finish()
	}

	#[tokio::test]
	async fn intercept_replaces_authorization_and_passes_through() {
		let calls = Arc::new(AtomicUsize::new(0));
		let interceptor = interceptor(test_team_key(), KeyProvider::from_key(test_signing_key()));
		let mut request = request();

		request.headers_mut().append(AUTHORIZATION, HeaderValue::from_static("Basic old"));

		let ((seen, seen_base), body) = run_spy(&interceptor, request, calls.clone())
			.await
			.expect("Interception should succeed.");
		let values = seen.headers().get_all(AUTHORIZATION).iter().collect::<Vec<_>>();

		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(values.len(), 1, "Prior Authorization values must be replaced.");
		assert!(values[0].is_sensitive());
		assert_bearer_shape(values[0].to_str().expect("Header should be ASCII."));
		assert_eq!(seen.uri().path(), "/v1/apps");
		assert_eq!(seen_base, base_url());
		assert_eq!(body.as_deref(), Some(b"{}".as_slice()));
	}

	#[tokio::test]
	async fn provider_failure_skips_next() {
		let calls = Arc::new(AtomicUsize::new(0));
		let provider = KeyProvider::from_fn(|| {
			Err(KeyResolutionError::provider(std::io::Error::other("keychain locked")))
		});
		let interceptor = interceptor(KeyType::Individual, provider);
		let err = run_spy(&interceptor, request(), calls.clone())
			.await
			.expect_err("Provider failure must abort the request.");

		assert!(matches!(err, Error::KeyResolution(KeyResolutionError::Provider { .. })));
		assert_eq!(calls.load(Ordering::SeqCst), 0, "Next must never run after a key failure.");
	}

	#[tokio::test]
	async fn next_errors_pass_through_unchanged() {
		let interceptor = interceptor(test_team_key(), KeyProvider::from_key(test_signing_key()));
		let err = interceptor
			.intercept(
				request(),
				None::<Vec<u8>>,
				base_url(),
				"apps_getCollection",
				|_: HttpRequest, _: Option<Vec<u8>>, _: Url| async move {
					Err::<((), Option<Vec<u8>>), Error>(
						crate::error::TransportError::network(std::io::Error::other("reset"))
							.into(),
					)
				},
			)
			.await
			.expect_err("Next failure must surface.");

		assert!(matches!(err, Error::Transport(_)));
	}

	#[tokio::test]
	async fn every_request_resolves_the_key_without_a_cache() {
		let resolutions = Arc::new(AtomicUsize::new(0));
		let calls = Arc::new(AtomicUsize::new(0));
		let interceptor = interceptor(test_team_key(), counting_provider(resolutions.clone()));

		for _ in 0..3 {
			run_spy(&interceptor, request(), calls.clone())
				.await
				.expect("Interception should succeed.");
		}

		assert_eq!(resolutions.load(Ordering::SeqCst), 3);
		assert_eq!(calls.load(Ordering::SeqCst), 3);
	}

	#[tokio::test]
	async fn cache_reuses_tokens_for_the_same_identity() {
		let resolutions = Arc::new(AtomicUsize::new(0));
		let cache = TokenCache::new();
		let first = interceptor(test_team_key(), counting_provider(resolutions.clone()))
			.with_cache(cache.clone());
		let second = interceptor(test_team_key(), counting_provider(resolutions.clone()))
			.with_cache(cache.clone());
		let a = first.bearer_token().expect("First token should be minted.");
		let b = second.bearer_token().expect("Second token should come from the cache.");

		assert_eq!(a, b);
		assert_eq!(resolutions.load(Ordering::SeqCst), 1);
		assert_eq!(cache.len(), 1);

		let later = a.expires_at - Duration::seconds(30);
		let c = first.bearer_token_at(later).expect("Stale cache entries should be re-minted.");

		assert_ne!(c.issued_at, a.issued_at);
		assert_eq!(resolutions.load(Ordering::SeqCst), 2);
	}

	#[test]
	fn oversized_cache_margin_falls_back_to_minting() {
		let resolutions = Arc::new(AtomicUsize::new(0));
		let interceptor = interceptor(test_team_key(), counting_provider(resolutions.clone()))
			.with_cache(TokenCache::new().with_reuse_margin(Duration::MAX));

		interceptor.bearer_token_at(test_issued_at()).expect("First token should be minted.");
		interceptor.bearer_token_at(test_issued_at()).expect("Second token should be minted.");

		assert_eq!(resolutions.load(Ordering::SeqCst), 2);
	}

	#[test]
	fn fixed_validity_is_twenty_minutes() {
		let interceptor =
			interceptor(KeyType::Individual, KeyProvider::from_key(test_signing_key()));
		let token =
			interceptor.bearer_token_at(test_issued_at()).expect("Token should be minted.");
		let (_, payload, _) = token.segments().expect("Token should have three segments.");

		assert_eq!(
			decode_segment(payload),
			r#"{"aud":"appstoreconnect-v1","exp":1700001200,"iat":1700000000,"sub":"user"}"#
		);
	}

	#[test]
	fn equality_ignores_providers_and_caches() {
		let a = interceptor(test_team_key(), KeyProvider::from_key(test_signing_key()));
		let b = interceptor(test_team_key(), KeyProvider::from_key(rotated_signing_key()))
			.with_cache(TokenCache::new());
		let other_issuer = interceptor(
			KeyType::team(IssuerId::new("ISSUER-2").expect("Issuer fixture should be valid.")),
			KeyProvider::from_key(test_signing_key()),
		);
		let other_key = AuthorizationInterceptor::new(TokenConfig::new(
			KeyId::new("ZZZ9999999").expect("Key fixture should be valid."),
			test_team_key(),
			KeyProvider::from_key(test_signing_key()),
		));

		assert_eq!(a, b);
		assert_eq!(hash_of(&a), hash_of(&b));
		assert_ne!(a, other_issuer);
		assert_ne!(a, other_key);
		assert_eq!(HashSet::<AuthorizationInterceptor>::from_iter([a, b, other_key]).len(), 2);
	}
}
