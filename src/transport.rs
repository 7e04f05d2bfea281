//! reqwest-backed terminal pipeline stage.
//!
//! [`ReqwestTransport`] implements [`Next`] so it can sit directly behind an
//! [`AuthorizationInterceptor`]. Request URIs are resolved against the base URL by appending
//! their path (and query) to the base path, so a base of `https://host/api/` and a request for
//! `/v1/apps` reach `https://host/api/v1/apps`. [`AuthorizedClient`] bundles the pieces for
//! callers that do not run their own pipeline.

// self
use crate::{
	_prelude::*,
	error::TransportError,
	intercept::{AuthorizationInterceptor, HttpRequest, Next},
};

/// Response head returned by the transport; the body travels separately.
pub type HttpResponse = http::Response<()>;

/// Thin wrapper around [`ReqwestClient`] that executes pipeline requests.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Executes `request` against `base_url` and buffers the response body.
	///
	/// Empty response bodies are returned as `None`.
	pub async fn send(
		&self,
		request: HttpRequest,
		body: Option<Vec<u8>>,
		base_url: Url,
	) -> Result<(HttpResponse, Option<Vec<u8>>)> {
		let url = resolve_url(&base_url, request.uri())?;
		let (parts, ()) = request.into_parts();
		let mut builder = self.0.request(parts.method, url).headers(parts.headers);

		if let Some(body) = body {
			builder = builder.body(body);
		}

		let response = builder.send().await.map_err(TransportError::from)?;
		let mut head = HttpResponse::new(());

		*head.status_mut() = response.status();
		*head.version_mut() = response.version();
		*head.headers_mut() = response.headers().to_owned();

		let bytes = response.bytes().await.map_err(TransportError::from)?;
		let body = if bytes.is_empty() { None } else { Some(bytes.to_vec()) };

		Ok((head, body))
	}
}
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Next<Vec<u8>> for ReqwestTransport {
	type Error = Error;
	type Response = HttpResponse;

	fn run(
		self,
		request: HttpRequest,
		body: Option<Vec<u8>>,
		base_url: Url,
	) -> impl Future<Output = Result<(HttpResponse, Option<Vec<u8>>)>> + Send {
		async move { self.send(request, body, base_url).await }
	}
}

/// Interceptor, transport, and base URL bundled for direct use.
#[derive(Clone, Debug)]
pub struct AuthorizedClient {
	/// Stage that signs each request.
	pub interceptor: AuthorizationInterceptor,
	/// Stage that executes each request.
	pub transport: ReqwestTransport,
	/// Server URL every request path is resolved against.
	pub base_url: Url,
}
impl AuthorizedClient {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(interceptor: AuthorizationInterceptor, base_url: Url) -> Self {
		Self { interceptor, transport: ReqwestTransport::default(), base_url }
	}

	/// Replaces the transport.
	pub fn with_transport(mut self, transport: ReqwestTransport) -> Self {
		self.transport = transport;

		self
	}

	/// Signs and sends `request`.
	pub async fn send(
		&self,
		request: HttpRequest,
		body: Option<Vec<u8>>,
		operation_id: &str,
	) -> Result<(HttpResponse, Option<Vec<u8>>)> {
		self.interceptor
			.intercept(request, body, self.base_url.clone(), operation_id, self.transport.clone())
			.await
	}
}

fn resolve_url(base_url: &Url, uri: &http::Uri) -> Result<Url, TransportError> {
	if uri.scheme().is_some() {
		return Ok(Url::parse(&uri.to_string())?);
	}

	let mut url = base_url.clone();
	let path = format!(
		"{}/{}",
		base_url.path().trim_end_matches('/'),
		uri.path().trim_start_matches('/')
	);

	url.set_path(&path);
	url.set_query(uri.query());

	Ok(url)
}
