use serde::Deserialize;

/// Named endpoints of the REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Authenticate,
    RequestToken,
    AccessToken,
    StatusesUserTimeline,
    AccountVerifyCredentials,
}

impl Endpoint {
    pub const ALL: [Endpoint; 5] = [
        Endpoint::Authenticate,
        Endpoint::RequestToken,
        Endpoint::AccessToken,
        Endpoint::StatusesUserTimeline,
        Endpoint::AccountVerifyCredentials,
    ];

    /// Path of the endpoint below the API host.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Authenticate => "/oauth/authenticate",
            Endpoint::RequestToken => "/oauth/request_token",
            Endpoint::AccessToken => "/oauth/access_token",
            Endpoint::StatusesUserTimeline => "/1.1/statuses/user_timeline.json",
            Endpoint::AccountVerifyCredentials => "/1.1/account/verify_credentials.json",
        }
    }
}

pub const TWITTER_API_BASE: &str = "https://api.twitter.com";

/// Endpoint URL table. Built once and read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    authenticate: String,
    request_token: String,
    access_token: String,
    statuses_user_timeline: String,
    account_verify_credentials: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints::with_base(TWITTER_API_BASE)
    }
}

impl Endpoints {
    /// Every endpoint under `base` (scheme and host, no trailing slash).
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        let url = |endpoint: Endpoint| format!("{}{}", base, endpoint.path());
        Endpoints {
            authenticate: url(Endpoint::Authenticate),
            request_token: url(Endpoint::RequestToken),
            access_token: url(Endpoint::AccessToken),
            statuses_user_timeline: url(Endpoint::StatusesUserTimeline),
            account_verify_credentials: url(Endpoint::AccountVerifyCredentials),
        }
    }

    /// Replace a single entry.
    pub fn with(mut self, endpoint: Endpoint, url: impl Into<String>) -> Self {
        *self.slot(endpoint) = url.into();
        self
    }

    pub fn get(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Authenticate => &self.authenticate,
            Endpoint::RequestToken => &self.request_token,
            Endpoint::AccessToken => &self.access_token,
            Endpoint::StatusesUserTimeline => &self.statuses_user_timeline,
            Endpoint::AccountVerifyCredentials => &self.account_verify_credentials,
        }
    }

    fn slot(&mut self, endpoint: Endpoint) -> &mut String {
        match endpoint {
            Endpoint::Authenticate => &mut self.authenticate,
            Endpoint::RequestToken => &mut self.request_token,
            Endpoint::AccessToken => &mut self.access_token,
            Endpoint::StatusesUserTimeline => &mut self.statuses_user_timeline,
            Endpoint::AccountVerifyCredentials => &mut self.account_verify_credentials,
        }
    }
}
