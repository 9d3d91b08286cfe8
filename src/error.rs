//! Failures raised while signing, sending, or reading back a request.
//!
//! None of these cross the public boundary of [`crate::OAuthClient`]; they are
//! logged there and turned into `None`.

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Sending the request or reading the response failed (DNS, TCP, TLS, I/O).
    #[error("transport failure: {source}")]
    Transport {
        #[source]
        source: BoxError,
    },
    /// A derived operation was called without one of its required arguments.
    #[error("missing required argument `{name}`")]
    MissingArgument { name: &'static str },
    /// The response body is not in the expected encoding or format.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
    /// The target URL could not be parsed as an absolute URL.
    #[error("invalid target url `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl Error {
    pub fn transport(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Transport {
            source: Box::new(source),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedResponse {
            reason: reason.into(),
        }
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::transport(e)
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Error::malformed(format!("body is not valid UTF-8: {}", e))
    }
}
