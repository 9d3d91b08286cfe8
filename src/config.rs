use serde::Deserialize;

use crate::endpoint::Endpoints;
use crate::values::{AuthorizationScope, DEFAULT_USER_AGENT};

/// Client settings. Every field has a default, so a partial document deserializes.
///
/// ```
/// use twitter_auth::{AuthorizationScope, ClientConfig};
///
/// let config = ClientConfig::default().authorization_scope(AuthorizationScope::OAuthOnly);
/// assert_eq!(config.user_agent, "HTTP Client");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Sent as `User-Agent` with header authorization.
    pub user_agent: String,
    /// Parameters written into the `Authorization` header.
    pub authorization_scope: AuthorizationScope,
    pub endpoints: Endpoints,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            authorization_scope: AuthorizationScope::default(),
            endpoints: Endpoints::default(),
        }
    }
}

impl ClientConfig {
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn authorization_scope(mut self, scope: AuthorizationScope) -> Self {
        self.authorization_scope = scope;
        self
    }

    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Endpoint;

    #[test]
    fn partial_document_keeps_defaults() {
        let config: ClientConfig = serde_json::from_str(
            r#"{
                "authorization_scope": "oauth_only",
                "endpoints": { "request_token": "http://localhost:9000/rt" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.authorization_scope, AuthorizationScope::OAuthOnly);
        assert_eq!(
            config.endpoints.get(Endpoint::RequestToken),
            "http://localhost:9000/rt"
        );
        assert_eq!(
            config.endpoints.get(Endpoint::Authenticate),
            "https://api.twitter.com/oauth/authenticate"
        );
    }

    #[test]
    fn empty_document_is_default() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
