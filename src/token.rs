use std::collections::BTreeMap;

use crate::values::{
    OAUTH_PARAM_KEY_CALLBACK_CONFIRMED, OAUTH_PARAM_KEY_TOKEN, OAUTH_PARAM_KEY_TOKEN_SECRET,
};

/// Token pair pulled out of a request-token or access-token response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenResponse {
    pub oauth_token: String,
    pub oauth_token_secret: String,
    /// Only present on request-token responses.
    pub oauth_callback_confirmed: Option<bool>,
    /// Everything else the provider sent, e.g. `user_id` and `screen_name`.
    pub extra: BTreeMap<String, String>,
}

impl TokenResponse {
    /// `None` unless both `oauth_token` and `oauth_token_secret` are present.
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        let oauth_token = map.get(OAUTH_PARAM_KEY_TOKEN)?.clone();
        let oauth_token_secret = map.get(OAUTH_PARAM_KEY_TOKEN_SECRET)?.clone();
        let oauth_callback_confirmed = map
            .get(OAUTH_PARAM_KEY_CALLBACK_CONFIRMED)
            .map(|v| v == "true");
        let extra = map
            .iter()
            .filter(|(k, _)| {
                ![
                    OAUTH_PARAM_KEY_TOKEN,
                    OAUTH_PARAM_KEY_TOKEN_SECRET,
                    OAUTH_PARAM_KEY_CALLBACK_CONFIRMED,
                ]
                .contains(&k.as_str())
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Some(TokenResponse {
            oauth_token,
            oauth_token_secret,
            oauth_callback_confirmed,
            extra,
        })
    }
}
