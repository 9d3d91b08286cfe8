use crate::error::Result;
use crate::request::SignedRequest;

/// Sends a [`SignedRequest`] and hands back the raw response body.
///
/// Implementations return the body for any response they receive, whatever its
/// status code, and an error only when the exchange itself fails.
pub trait Transport {
    fn send(&self, request: &SignedRequest) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &SignedRequest) -> Result<Vec<u8>> {
        (**self).send(request)
    }
}

/// Blocking `reqwest` transport. Timeouts, proxies and TLS settings belong to the
/// client passed to [`ReqwestTransport::with_client`].
///
/// [`ReqwestTransport::new`], its `Default` impl and `OAuthClient::new` build a
/// `reqwest::blocking::Client`, which panics when created or dropped inside a Tokio
/// runtime. From async code, create and use the client on a blocking thread such as
/// `tokio::task::spawn_blocking`.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "reqwest")]
impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        ReqwestTransport { client }
    }
}

#[cfg(feature = "reqwest")]
impl Transport for ReqwestTransport {
    fn send(&self, request: &SignedRequest) -> Result<Vec<u8>> {
        use crate::values::HttpMethod;

        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };
        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send()?;
        tracing::debug!(status = %response.status(), url = %request.url, "received response");
        Ok(response.bytes()?.to_vec())
    }
}
