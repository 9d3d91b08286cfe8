//! Signed calls against the fixed endpoint table.
//!
//! Every public operation here either returns a value or `None`. Transport faults,
//! missing arguments and unreadable bodies are logged with `tracing` and never
//! propagated.

use std::collections::BTreeMap;
use url::Url;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::request::SignedRequest;
use crate::signer::OAuthSignBuilder;
use crate::token::TokenResponse;
use crate::transport::Transport;
use crate::util::{percent_encode, qs_to_dict};
use crate::values::*;

/// One signed call: target, method, optional token pair and callback, and extra
/// parameters. Extras start out empty for every call.
#[derive(Clone, Debug)]
pub struct RequestOptions<'a> {
    url: &'a str,
    method: HttpMethod,
    oauth_token: &'a str,
    oauth_token_secret: &'a str,
    oauth_callback: &'a str,
    mode: AuthorizationMode,
    params: Vec<(String, String)>,
}

impl<'a> RequestOptions<'a> {
    /// Query authorization, no token, no callback, no extra parameters.
    pub fn new(url: &'a str, method: HttpMethod) -> Self {
        RequestOptions {
            url,
            method,
            oauth_token: "",
            oauth_token_secret: "",
            oauth_callback: "",
            mode: AuthorizationMode::Query,
            params: Vec::new(),
        }
    }

    pub fn token(mut self, oauth_token: &'a str, oauth_token_secret: &'a str) -> Self {
        self.oauth_token = oauth_token;
        self.oauth_token_secret = oauth_token_secret;
        self
    }

    pub fn callback(mut self, oauth_callback: &'a str) -> Self {
        self.oauth_callback = oauth_callback;
        self
    }

    pub fn mode(mut self, mode: AuthorizationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn header_auth(self) -> Self {
        self.mode(AuthorizationMode::Header)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

/// OAuth 1.0a client holding the consumer credentials.
///
/// Nothing but the credentials, the configuration and the transport outlives a
/// call, so a client can be shared between threads when its transport can.
pub struct OAuthClient<T> {
    consumer_key: String,
    consumer_secret: String,
    config: ClientConfig,
    transport: T,
}

#[cfg(feature = "reqwest")]
impl OAuthClient<crate::transport::ReqwestTransport> {
    /// Client over a default blocking `reqwest` transport and the Twitter endpoints.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        OAuthClient::with_transport(
            consumer_key,
            consumer_secret,
            ClientConfig::default(),
            crate::transport::ReqwestTransport::new(),
        )
    }
}

impl<T: Transport> OAuthClient<T> {
    pub fn with_transport(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        config: ClientConfig,
        transport: T,
    ) -> Self {
        OAuthClient {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            config,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the authenticated request without sending it.
    pub fn sign_request(&self, options: &RequestOptions<'_>) -> Result<SignedRequest> {
        let signed = OAuthSignBuilder::new(self.consumer_key.as_str())
            .oauth_callback(options.oauth_callback)
            .oauth_token(options.oauth_token)
            .add_params(options.params.iter().cloned())
            .sign(
                options.method,
                options.url,
                &self.consumer_secret,
                options.oauth_token_secret,
            )?;
        Ok(SignedRequest::new(
            &signed,
            options.mode,
            self.config.authorization_scope,
            &self.config.user_agent,
        ))
    }

    /// Sign and send, surfacing every failure.
    pub fn send(&self, options: &RequestOptions<'_>) -> Result<Vec<u8>> {
        let request = self.sign_request(options)?;
        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending signed request");
        self.transport.send(&request)
    }

    /// Sign and send; the raw body of any received response, `None` on failure.
    pub fn do_request(&self, options: &RequestOptions<'_>) -> Option<Vec<u8>> {
        or_absent("do_request", self.send(options))
    }

    /// POST a request-token call with `oauth_callback`; the parsed response.
    pub fn request_token(&self, oauth_callback: &str) -> Option<BTreeMap<String, String>> {
        or_absent(
            "request_token",
            self.try_request_token(oauth_callback),
        )
    }

    /// `<authenticate endpoint>?oauth_token=<token>`, `None` for an empty token.
    ///
    /// A query already on the configured endpoint is kept and `oauth_token` is
    /// appended to it.
    pub fn request_auth_url(&self, oauth_token: &str) -> Option<String> {
        if oauth_token.is_empty() {
            return None;
        }
        or_absent("request_auth_url", self.try_request_auth_url(oauth_token))
    }

    /// Exchange a temporary token and verifier for an access token.
    ///
    /// Signs with an empty token secret. Use
    /// [`OAuthClient::request_access_token_with_secret`] for providers that expect
    /// the temporary token secret in the signing key.
    pub fn request_access_token(
        &self,
        oauth_token: &str,
        oauth_verifier: &str,
    ) -> Option<BTreeMap<String, String>> {
        self.request_access_token_with_secret(oauth_token, "", oauth_verifier)
    }

    pub fn request_access_token_with_secret(
        &self,
        oauth_token: &str,
        oauth_token_secret: &str,
        oauth_verifier: &str,
    ) -> Option<BTreeMap<String, String>> {
        or_absent(
            "request_access_token",
            self.try_request_access_token(oauth_token, oauth_token_secret, oauth_verifier),
        )
    }

    /// Most recent statuses of the user named by `screen_name` or `user_id` in `params`.
    pub fn request_statuses_user_timeline<K, V>(
        &self,
        oauth_token: &str,
        oauth_token_secret: &str,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let url = self.config.endpoints.get(Endpoint::StatusesUserTimeline);
        self.get(url, oauth_token, oauth_token_secret, params)
    }

    pub fn request_account_verify_credentials<K, V>(
        &self,
        oauth_token: &str,
        oauth_token_secret: &str,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let url = self.config.endpoints.get(Endpoint::AccountVerifyCredentials);
        self.get(url, oauth_token, oauth_token_secret, params)
    }

    /// Header-authorized GET of any endpoint with a fully authorized token.
    pub fn get<K, V>(
        &self,
        url: &str,
        oauth_token: &str,
        oauth_token_secret: &str,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        or_absent(
            "get",
            self.try_authorized(HttpMethod::Get, url, oauth_token, oauth_token_secret, params),
        )
    }

    /// Header-authorized POST of any endpoint with a fully authorized token.
    pub fn post<K, V>(
        &self,
        url: &str,
        oauth_token: &str,
        oauth_token_secret: &str,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        or_absent(
            "post",
            self.try_authorized(HttpMethod::Post, url, oauth_token, oauth_token_secret, params),
        )
    }

    fn try_request_auth_url(&self, oauth_token: &str) -> Result<String> {
        let endpoint = self.config.endpoints.get(Endpoint::Authenticate);
        let mut url = Url::parse(endpoint).map_err(|source| Error::InvalidUrl {
            url: endpoint.to_string(),
            source,
        })?;
        let pair = format!("{}={}", OAUTH_PARAM_KEY_TOKEN, percent_encode(oauth_token));
        let query = match url.query() {
            Some(query) if !query.is_empty() => format!("{}&{}", query, pair),
            _ => pair,
        };
        url.set_query(Some(&query));
        Ok(url.into())
    }

    fn try_request_token(&self, oauth_callback: &str) -> Result<BTreeMap<String, String>> {
        require("oauth_callback", oauth_callback)?;
        let options = RequestOptions::new(
            self.config.endpoints.get(Endpoint::RequestToken),
            HttpMethod::Post,
        )
        .callback(oauth_callback)
        .header_auth();
        parse_token_response(self.send(&options)?)
    }

    fn try_request_access_token(
        &self,
        oauth_token: &str,
        oauth_token_secret: &str,
        oauth_verifier: &str,
    ) -> Result<BTreeMap<String, String>> {
        require("oauth_token", oauth_token)?;
        require("oauth_verifier", oauth_verifier)?;
        let options = RequestOptions::new(
            self.config.endpoints.get(Endpoint::AccessToken),
            HttpMethod::Post,
        )
        .token(oauth_token, oauth_token_secret)
        .header_auth()
        .param(OAUTH_PARAM_KEY_VERIFIER, oauth_verifier);
        parse_token_response(self.send(&options)?)
    }

    fn try_authorized<K, V>(
        &self,
        method: HttpMethod,
        url: &str,
        oauth_token: &str,
        oauth_token_secret: &str,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Result<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        require("oauth_token", oauth_token)?;
        require("oauth_token_secret", oauth_token_secret)?;
        let options = RequestOptions::new(url, method)
            .token(oauth_token, oauth_token_secret)
            .header_auth()
            .params(params);
        Ok(String::from_utf8(self.send(&options)?)?)
    }
}

fn require(name: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        Err(Error::MissingArgument { name })
    } else {
        Ok(())
    }
}

/// A token response must at least carry the token pair.
fn parse_token_response(body: Vec<u8>) -> Result<BTreeMap<String, String>> {
    let map = qs_to_dict(&String::from_utf8(body)?)?;
    if TokenResponse::from_map(&map).is_none() {
        return Err(Error::malformed(
            "token response lacks oauth_token or oauth_token_secret",
        ));
    }
    Ok(map)
}

fn or_absent<V>(operation: &'static str, result: Result<V>) -> Option<V> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(operation, error = %e, "signed call produced no result");
            None
        }
    }
}
