//! Network transport

use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Method;

use crate::body::Payload;
use crate::error::HttpError;
use crate::response::RawResponse;

/// Fully prepared request handed to a [`Transport`]
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// HTTP method
    pub method: Method,
    /// Target URL, used verbatim
    pub url: String,
    /// Selected headers
    pub headers: HeaderMap,
    /// Formatted body
    pub body: Option<Payload>,
}

/// Performs a single network round trip
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Send the request and return the unparsed response
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, HttpError>;
}

/// Transport backed by [`reqwest::Client`]
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport from a reqwest::Client
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, HttpError> {
        let PreparedRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.inner.request(method, url).headers(headers);

        builder = match body {
            Some(Payload::Json(text)) => builder.body(text),
            Some(Payload::Form(form)) => builder.multipart(form.into_multipart()),
            None => builder,
        };

        let response = builder.send().await.map_err(HttpError::from)?;
        RawResponse::from_reqwest(response).await
    }
}
