use serde::Deserialize;

pub const OAUTH_VALUE_VERSION: &str = "1.0";
pub const OAUTH_VALUE_SIGMETHOD_HMACSHA1: &str = "HMAC-SHA1";

pub const OAUTH_HEADER: &str = "OAuth";
pub const OAUTH_PARAM_PREFIX: &str = "oauth_";

pub const OAUTH_PARAM_KEY_CALLBACK: &str = "oauth_callback";
pub const OAUTH_PARAM_KEY_CALLBACK_CONFIRMED: &str = "oauth_callback_confirmed";
pub const OAUTH_PARAM_KEY_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_PARAM_KEY_NONCE: &str = "oauth_nonce";
pub const OAUTH_PARAM_KEY_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_PARAM_KEY_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_PARAM_KEY_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_PARAM_KEY_TOKEN: &str = "oauth_token";
pub const OAUTH_PARAM_KEY_TOKEN_SECRET: &str = "oauth_token_secret";
pub const OAUTH_PARAM_KEY_VERIFIER: &str = "oauth_verifier";
pub const OAUTH_PARAM_KEY_VERSION: &str = "oauth_version";

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_USER_AGENT: &str = "User-Agent";

pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
pub const DEFAULT_USER_AGENT: &str = "HTTP Client";

/// HTTP methods a signed request can be issued with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl From<HttpMethod> for &'static str {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Where the signed OAuth parameters travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthorizationMode {
    /// `Authorization: OAuth ...` header, plus the parameters in the query or body.
    Header,
    /// Query or body only; no headers are attached.
    Query,
}

/// Which parameters are written into the `Authorization` header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationScope {
    /// Every signed parameter, including caller extras.
    #[default]
    All,
    /// Only `oauth_*` parameters.
    #[serde(rename = "oauth_only")]
    OAuthOnly,
}

impl AuthorizationScope {
    pub fn includes(self, key: &str) -> bool {
        match self {
            AuthorizationScope::All => true,
            AuthorizationScope::OAuthOnly => key.starts_with(OAUTH_PARAM_PREFIX),
        }
    }
}
