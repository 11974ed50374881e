//! Thin HTTP request helper
//!
//! [`RequestClient`] wraps a network call with shortcuts for the common verbs,
//! an optional `Authorization` credential and two body encodings: JSON text
//! or a multipart form. Responses are returned unparsed, a 4xx or 5xx status
//! is not an error.
//!
//! Params are positional: only their values are appended to the path, so
//! `{id: 42}` on `users` targets `{base_route}/users/42/`.
//!
//! # Example
//!
//! ```no_run
//! use ndume::{BodyEncoding, Credential, Error, Params, RequestClient};
//! use serde_json::json;
//!
//! async fn example() -> Result<(), Error> {
//!     let client = RequestClient::new("https://api.example.com");
//!     client.set_credential(Credential::bearer("xyz")).await;
//!
//!     let params = Params::new().with("id", 42);
//!     let user = client.get("users", Some(&params)).await?;
//!     println!("{}", user.status());
//!
//!     client
//!         .post(&json!({"name": "ada"}), BodyEncoding::Json, "users", None)
//!         .await?;
//!     Ok(())
//! }
//! ```

mod body;
mod client;
mod credential;
mod error;
mod headers;
mod params;
mod response;
mod transport;

pub use body::{format_body, BodyEncoding, FormBody, FormPart, Payload};
pub use client::{RequestClient, RequestClientBuilder};
pub use credential::Credential;
pub use error::{Error, ErrorKind, HttpError};
pub use headers::select_headers;
pub use params::{format_params, Params};
pub use reqwest::Method;
pub use response::RawResponse;
pub use transport::{PreparedRequest, ReqwestTransport, Transport};
