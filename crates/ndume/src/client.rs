//! Request client

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::body::{format_body, BodyEncoding, FormBody, Payload};
use crate::credential::Credential;
use crate::error::Error;
use crate::headers::select_headers;
use crate::params::{format_params, Params};
use crate::response::RawResponse;
use crate::transport::{PreparedRequest, ReqwestTransport, Transport};

/// HTTP client bound to a base route
///
/// Every call is an independent round trip. The credential is read once per
/// call, before the request is sent, so replacing it never affects a request
/// already in flight.
#[derive(Debug)]
pub struct RequestClient {
    base_route: String,
    credential: RwLock<Option<Credential>>,
    transport: Arc<dyn Transport>,
}

impl RequestClient {
    /// Create a new client using the default reqwest transport
    ///
    /// `base_route` is used as given; a trailing slash is not removed.
    pub fn new(base_route: impl Into<String>) -> Self {
        Self {
            base_route: base_route.into(),
            credential: RwLock::new(None),
            transport: Arc::new(ReqwestTransport::default()),
        }
    }

    /// Create a new client builder
    pub fn builder(base_route: impl Into<String>) -> RequestClientBuilder {
        RequestClientBuilder::new(base_route)
    }

    /// Base route of every request
    pub fn base_route(&self) -> &str {
        &self.base_route
    }

    /// Replace the credential
    ///
    /// Waits for in-flight calls to finish reading their credential snapshot.
    pub async fn set_credential(&self, credential: Credential) {
        *self.credential.write().await = Some(credential);
    }

    /// Remove the credential
    pub async fn clear_credential(&self) {
        *self.credential.write().await = None;
    }

    /// Current credential
    pub async fn credential(&self) -> Option<Credential> {
        self.credential.read().await.clone()
    }

    /// Send a request to `base_route/{path}{params}`
    ///
    /// `params` must already be formatted, see [`format_params`]. Neither
    /// `path` nor `params` are URL-encoded.
    #[instrument(skip(self, body), fields(base_route = %self.base_route))]
    pub async fn dispatch(
        &self,
        method: Method,
        body: Option<Payload>,
        path: Option<&str>,
        params: Option<&str>,
    ) -> Result<RawResponse, Error> {
        let url = format!(
            "{}/{}{}",
            self.base_route,
            path.unwrap_or_default(),
            params.unwrap_or_default()
        );

        let credential = self.credential.read().await.clone();
        let json = matches!(body, Some(Payload::Json(_)));
        let headers = select_headers(credential.as_ref(), json)?;

        tracing::debug!(%method, %url, "Dispatching request");

        let response = self
            .transport
            .send(PreparedRequest {
                method,
                url,
                headers,
                body,
            })
            .await?;

        tracing::debug!(status = response.status(), "Received response");

        Ok(response)
    }

    /// GET `path`, optionally followed by params
    pub async fn get(&self, path: &str, params: Option<&Params>) -> Result<RawResponse, Error> {
        self.send_payload(Method::GET, None, path, params).await
    }

    /// DELETE `path`, optionally followed by params
    pub async fn delete(&self, path: &str, params: Option<&Params>) -> Result<RawResponse, Error> {
        self.send_payload(Method::DELETE, None, path, params).await
    }

    /// POST `body` encoded as `encoding`
    pub async fn post<B>(
        &self,
        body: &B,
        encoding: BodyEncoding,
        path: &str,
        params: Option<&Params>,
    ) -> Result<RawResponse, Error>
    where
        B: Serialize + ?Sized,
    {
        let payload = format_body(body, encoding)?;
        self.send_payload(Method::POST, Some(payload), path, params)
            .await
    }

    /// PUT `body` encoded as `encoding`
    pub async fn put<B>(
        &self,
        body: &B,
        encoding: BodyEncoding,
        path: &str,
        params: Option<&Params>,
    ) -> Result<RawResponse, Error>
    where
        B: Serialize + ?Sized,
    {
        let payload = format_body(body, encoding)?;
        self.send_payload(Method::PUT, Some(payload), path, params)
            .await
    }

    /// PATCH `body` encoded as `encoding`
    pub async fn patch<B>(
        &self,
        body: &B,
        encoding: BodyEncoding,
        path: &str,
        params: Option<&Params>,
    ) -> Result<RawResponse, Error>
    where
        B: Serialize + ?Sized,
    {
        let payload = format_body(body, encoding)?;
        self.send_payload(Method::PATCH, Some(payload), path, params)
            .await
    }

    /// POST a prepared multipart form
    pub async fn post_form(
        &self,
        form: FormBody,
        path: &str,
        params: Option<&Params>,
    ) -> Result<RawResponse, Error> {
        self.send_payload(Method::POST, Some(Payload::Form(form)), path, params)
            .await
    }

    /// PUT a prepared multipart form
    pub async fn put_form(
        &self,
        form: FormBody,
        path: &str,
        params: Option<&Params>,
    ) -> Result<RawResponse, Error> {
        self.send_payload(Method::PUT, Some(Payload::Form(form)), path, params)
            .await
    }

    /// PATCH a prepared multipart form
    pub async fn patch_form(
        &self,
        form: FormBody,
        path: &str,
        params: Option<&Params>,
    ) -> Result<RawResponse, Error> {
        self.send_payload(Method::PATCH, Some(Payload::Form(form)), path, params)
            .await
    }

    async fn send_payload(
        &self,
        method: Method,
        payload: Option<Payload>,
        path: &str,
        params: Option<&Params>,
    ) -> Result<RawResponse, Error> {
        let params = params.map(|p| format_params(Some(p))).transpose()?;
        self.dispatch(method, payload, Some(path), params.as_deref())
            .await
    }
}

/// Builder for [`RequestClient`]
///
/// Without a transport the client sends through a default
/// [`reqwest::Client`]. Timeouts, proxies and TLS settings belong to the
/// `reqwest::Client` handed to [`RequestClientBuilder::reqwest_client`].
#[derive(Debug)]
pub struct RequestClientBuilder {
    base_route: String,
    credential: Option<Credential>,
    transport: Option<Arc<dyn Transport>>,
}

impl RequestClientBuilder {
    fn new(base_route: impl Into<String>) -> Self {
        Self {
            base_route: base_route.into(),
            credential: None,
            transport: None,
        }
    }

    /// Initial credential
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Send through a preconfigured reqwest client
    pub fn reqwest_client(self, client: reqwest::Client) -> Self {
        self.transport(Arc::new(ReqwestTransport::from_reqwest(client)))
    }

    /// Use a custom transport
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client
    pub fn build(self) -> RequestClient {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::default()),
        };

        RequestClient {
            base_route: self.base_route,
            credential: RwLock::new(self.credential),
            transport,
        }
    }
}
