//! OAuth 1.0a request signer and a small client for the Twitter REST API.
//!
//! ```no_run
//! use twitter_auth::OAuthClient;
//!
//! let client = OAuthClient::new("consumer key", "consumer secret");
//! if let Some(token) = client.request_token("http://127.0.0.1:8888/p/authenticate/twitter") {
//!     if let Some(url) = client.request_auth_url(token.get("oauth_token").map(String::as_str).unwrap_or("")) {
//!         println!("authorize at {}", url);
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod request;
pub mod signer;
pub mod token;
pub mod transport;
pub mod values;

mod util;

pub use client::{OAuthClient, RequestOptions};
pub use config::ClientConfig;
pub use endpoint::{Endpoint, Endpoints};
pub use error::{Error, Result};
pub use request::SignedRequest;
pub use signer::{OAuthSignBuilder, SignedParameters};
pub use token::TokenResponse;
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::Transport;
pub use util::{percent_encode, qs_to_dict, url_to_endpoint_and_queries};
pub use values::{AuthorizationMode, AuthorizationScope, HttpMethod};
