use std::collections::BTreeMap;

use crate::signer::{encode_sorted, SignedParameters};
use crate::values::*;

/// A fully authenticated request, ready for a [`crate::Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: HttpMethod,
    /// Endpoint, with the sorted parameter string appended for GET.
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Sorted parameter string for POST; GET never has a body.
    pub body: Option<Vec<u8>>,
}

impl SignedRequest {
    pub fn new(
        signed: &SignedParameters,
        mode: AuthorizationMode,
        scope: AuthorizationScope,
        user_agent: &str,
    ) -> Self {
        let mut headers = Vec::new();
        if mode == AuthorizationMode::Header {
            headers.push((
                HEADER_AUTHORIZATION.to_string(),
                authorization_header(&signed.parameters, scope),
            ));
            if signed.method == HttpMethod::Post {
                headers.push((
                    HEADER_CONTENT_TYPE.to_string(),
                    CONTENT_TYPE_FORM.to_string(),
                ));
            }
            headers.push((HEADER_USER_AGENT.to_string(), user_agent.to_string()));
        }

        // percent-encoded output is pure ASCII, so its ISO-8859-1 bytes are its UTF-8 bytes
        let param_str = signed.parameter_string();
        let (url, body) = match signed.method {
            HttpMethod::Get => (format!("{}?{}", signed.endpoint, param_str), None),
            HttpMethod::Post => (signed.endpoint.clone(), Some(param_str.into_bytes())),
        };

        SignedRequest {
            method: signed.method,
            url,
            headers,
            body,
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// `OAuth key="value", key2="value2"` over the parameters `scope` admits, sorted by encoded key.
pub fn authorization_header(params: &BTreeMap<String, String>, scope: AuthorizationScope) -> String {
    let pairs = encode_sorted(params.iter().filter(|(k, _)| scope.includes(k)))
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, v))
        .collect::<Vec<String>>()
        .join(", ");
    format!("{} {}", OAUTH_HEADER, pairs)
}
