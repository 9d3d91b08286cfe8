use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::Result;
use crate::util::{self, percent_encode};
use crate::values::*;

type HmacSha1 = Hmac<Sha1>;

/// OAuth Signature Builder
///
/// Collects everything that goes into one signed request. Nonce and timestamp are
/// generated at signing time unless pinned with [`OAuthSignBuilder::oauth_nonce`] and
/// [`OAuthSignBuilder::oauth_timestamp`].
#[derive(Clone, Debug)]
pub struct OAuthSignBuilder {
    oauth_consumer_key: String,
    oauth_nonce: Option<String>,
    oauth_timestamp: Option<i64>,
    oauth_callback: Option<String>,
    oauth_token: Option<String>,
    parameters: BTreeMap<String, String>,
}

/// The full parameter set of a request after signing, `oauth_signature` included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedParameters {
    pub method: HttpMethod,
    /// Target URL without query, as used in the signature base string.
    pub endpoint: String,
    pub parameters: BTreeMap<String, String>,
    pub signature: String,
}

impl SignedParameters {
    /// Sorted, percent-encoded `key=value&...` string of every parameter.
    pub fn parameter_string(&self) -> String {
        to_parameter_string(&self.parameters)
    }
}

impl OAuthSignBuilder {
    /// Constructor of OAuthSignBuilder with OAuth consumer_key.
    pub fn new(consumer_key: impl Into<String>) -> Self {
        OAuthSignBuilder {
            oauth_consumer_key: consumer_key.into(),
            oauth_nonce: None,
            oauth_timestamp: None,
            oauth_callback: None,
            oauth_token: None,
            parameters: BTreeMap::new(),
        }
    }

    pub fn oauth_nonce(&mut self, nonce: impl Into<String>) -> &mut Self {
        self.oauth_nonce = Some(nonce.into());
        self
    }

    pub fn oauth_timestamp(&mut self, timestamp: i64) -> &mut Self {
        self.oauth_timestamp = Some(timestamp);
        self
    }

    /// Sets `oauth_callback`; an empty string leaves it absent.
    pub fn oauth_callback(&mut self, callback: &str) -> &mut Self {
        self.oauth_callback = non_empty(callback);
        self
    }

    /// Sets `oauth_token`; an empty string leaves it absent.
    pub fn oauth_token(&mut self, token: &str) -> &mut Self {
        self.oauth_token = non_empty(token);
        self
    }

    /// Adds a raw (not yet encoded) parameter. Overwrites any parameter of the same name.
    pub fn add_param(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn add_params<K, V>(&mut self, params: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in params {
            self.add_param(k, v);
        }
        self
    }

    /// Sign a request to `url` with `method`.
    ///
    /// Any query already on `url` is folded into the signed parameters and stripped
    /// from the endpoint. Parameters are keyed by name, so a key repeated in that
    /// query keeps only its last value, and a parameter added with
    /// [`OAuthSignBuilder::add_param`] replaces a query value of the same name.
    /// `token_secret` may be empty.
    pub fn sign(
        &self,
        method: HttpMethod,
        url: &str,
        consumer_secret: &str,
        token_secret: &str,
    ) -> Result<SignedParameters> {
        let (endpoint, queries) = util::url_to_endpoint_and_queries(url)?;
        let mut parameters = self.build_params(queries);

        let param_str = to_parameter_string(&parameters);
        let base_str = signature_base_string(method, &endpoint, &param_str);
        tracing::debug!(base_string = %base_str, "built signature base string");

        let signature = sign_hmac_sha1(&signing_key(consumer_secret, token_secret), &base_str);
        parameters.insert(OAUTH_PARAM_KEY_SIGNATURE.to_string(), signature.clone());

        Ok(SignedParameters {
            method,
            endpoint,
            parameters,
            signature,
        })
    }

    fn build_params(&self, queries: Vec<(String, String)>) -> BTreeMap<String, String> {
        let nonce = self.oauth_nonce.clone().unwrap_or_else(generate_nonce);
        let timestamp = self
            .oauth_timestamp
            .unwrap_or_else(|| Utc::now().timestamp());

        let mut params = BTreeMap::new();
        params.insert(
            OAUTH_PARAM_KEY_CONSUMER_KEY.to_string(),
            self.oauth_consumer_key.clone(),
        );
        params.insert(OAUTH_PARAM_KEY_NONCE.to_string(), nonce);
        params.insert(
            OAUTH_PARAM_KEY_SIGNATURE_METHOD.to_string(),
            OAUTH_VALUE_SIGMETHOD_HMACSHA1.to_string(),
        );
        params.insert(OAUTH_PARAM_KEY_TIMESTAMP.to_string(), timestamp.to_string());
        params.insert(
            OAUTH_PARAM_KEY_VERSION.to_string(),
            OAUTH_VALUE_VERSION.to_string(),
        );
        if let Some(callback) = &self.oauth_callback {
            params.insert(OAUTH_PARAM_KEY_CALLBACK.to_string(), callback.clone());
        }
        if let Some(token) = &self.oauth_token {
            params.insert(OAUTH_PARAM_KEY_TOKEN.to_string(), token.clone());
        }
        params.extend(queries);
        params.extend(self.parameters.clone());
        params
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn generate_nonce() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Percent-encode every pair and sort by encoded key (then encoded value).
pub fn encode_sorted<'a, I>(params: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut encoded = params
        .into_iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect::<Vec<(String, String)>>();
    encoded.sort();
    encoded
}

/// Sorted `key=value` pairs joined with `&`.
pub fn to_parameter_string<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    encode_sorted(params)
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<String>>()
        .join("&")
}

/// `METHOD&encoded-endpoint&encoded-parameter-string`.
///
/// The parameter string is already encoded once and gets encoded again here.
pub fn signature_base_string(method: HttpMethod, endpoint: &str, parameter_string: &str) -> String {
    format!(
        "{}&{}&{}",
        percent_encode(method.as_str()),
        percent_encode(endpoint),
        percent_encode(parameter_string)
    )
}

/// `encoded-consumer-secret&encoded-token-secret`. The `&` is always present.
pub fn signing_key(consumer_secret: &str, token_secret: &str) -> String {
    format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    )
}

/// Base64 of HMAC-SHA1 over `message`.
pub fn sign_hmac_sha1(key: &str, message: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("SHA-1 HMAC accepts keys of any size");
    mac.update(message.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{prop_assert, prop_assert_eq, proptest};

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_signing_golden() {
        let sign = OAuthSignBuilder::new("ck")
            .oauth_nonce("12345")
            .oauth_timestamp(1_000_000_000)
            .sign(
                HttpMethod::Get,
                "https://api.example.com/1.1/test.json",
                "xyz",
                "",
            )
            .unwrap();
        assert_eq!(sign.signature, "nlWYCIEiCNcprzeyKE41RPE9ToM=");
        assert_eq!(sign.parameters[OAUTH_PARAM_KEY_SIGNATURE], sign.signature);
        assert_eq!(sign.endpoint, "https://api.example.com/1.1/test.json");
    }

    #[test]
    fn test_base_string_golden() {
        let params = map(&[
            ("oauth_consumer_key", "ck"),
            ("oauth_nonce", "12345"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1000000000"),
            ("oauth_version", "1.0"),
        ]);
        let base = signature_base_string(
            HttpMethod::Get,
            "https://api.example.com/1.1/test.json",
            &to_parameter_string(&params),
        );
        assert_eq!(
            base,
            "GET&https%3A%2F%2Fapi.example.com%2F1.1%2Ftest.json&oauth_consumer_key%3Dck%26oauth_nonce%3D12345%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1000000000%26oauth_version%3D1.0"
        );
        assert_eq!(
            sign_hmac_sha1(&signing_key("xyz", ""), &base),
            "nlWYCIEiCNcprzeyKE41RPE9ToM="
        );
    }

    #[test]
    fn test_signing_twitter_document() {
        // https://developer.twitter.com/en/docs/authentication/oauth-1-0a/creating-a-signature
        let sign = OAuthSignBuilder::new("xvz1evFS4wEEPTGEFPHBog")
            .oauth_nonce("kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg")
            .oauth_timestamp(1_318_622_958)
            .oauth_token("370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb")
            .add_param(
                "status",
                "Hello Ladies + Gentlemen, a signed OAuth request!",
            )
            .sign(
                HttpMethod::Post,
                "https://api.twitter.com/1.1/statuses/update.json?include_entities=true",
                "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
                "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
            )
            .unwrap();
        assert_eq!(sign.signature, "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
        assert_eq!(sign.endpoint, "https://api.twitter.com/1.1/statuses/update.json");
        assert_eq!(sign.parameters["include_entities"], "true");
    }

    #[test]
    fn test_signing_key_keeps_ampersand() {
        assert_eq!(signing_key("xyz", ""), "xyz&");
        assert_eq!(signing_key("a&b", "c d"), "a%26b&c%20d");
    }

    #[test]
    fn test_signature_excludes_itself() {
        let sign = OAuthSignBuilder::new("ck")
            .oauth_nonce("n")
            .oauth_timestamp(1)
            .oauth_token("tok")
            .add_param("screen_name", "_mru_")
            .sign(
                HttpMethod::Get,
                "https://api.example.com/1.1/test.json",
                "cs",
                "ts",
            )
            .unwrap();
        let mut unsigned = sign.parameters.clone();
        unsigned.remove(OAUTH_PARAM_KEY_SIGNATURE);
        let base = signature_base_string(
            HttpMethod::Get,
            &sign.endpoint,
            &to_parameter_string(&unsigned),
        );
        assert_eq!(sign_hmac_sha1(&signing_key("cs", "ts"), &base), sign.signature);
    }

    #[test]
    fn test_mandatory_and_conditional_params() {
        let sign = OAuthSignBuilder::new("ck")
            .sign(HttpMethod::Post, "https://api.example.com/x", "cs", "")
            .unwrap();
        let keys = sign.parameters.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![
                "oauth_consumer_key",
                "oauth_nonce",
                "oauth_signature",
                "oauth_signature_method",
                "oauth_timestamp",
                "oauth_version",
            ]
        );
        assert!(!sign.parameters[OAUTH_PARAM_KEY_NONCE].is_empty());
        assert!(sign.parameters[OAUTH_PARAM_KEY_TIMESTAMP].parse::<i64>().is_ok());

        let sign = OAuthSignBuilder::new("ck")
            .oauth_callback("http://127.0.0.1:8888/cb")
            .oauth_token("")
            .sign(HttpMethod::Post, "https://api.example.com/x", "cs", "")
            .unwrap();
        assert_eq!(
            sign.parameters[OAUTH_PARAM_KEY_CALLBACK],
            "http://127.0.0.1:8888/cb"
        );
        assert!(!sign.parameters.contains_key(OAUTH_PARAM_KEY_TOKEN));
    }

    #[test]
    fn test_nonce_is_unique() {
        let builder = OAuthSignBuilder::new("ck");
        let a = builder
            .sign(HttpMethod::Get, "https://api.example.com/x", "cs", "")
            .unwrap();
        let b = builder
            .sign(HttpMethod::Get, "https://api.example.com/x", "cs", "")
            .unwrap();
        assert_ne!(
            a.parameters[OAUTH_PARAM_KEY_NONCE],
            b.parameters[OAUTH_PARAM_KEY_NONCE]
        );
        assert!(a.parameters[OAUTH_PARAM_KEY_NONCE]
            .chars()
            .all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_repeated_query_key_keeps_last_value() {
        let sign = OAuthSignBuilder::new("ck")
            .add_param("b", "extra")
            .sign(
                HttpMethod::Get,
                "https://api.example.com/x?a=1&a=2&b=query",
                "cs",
                "",
            )
            .unwrap();
        assert_eq!(sign.parameters["a"], "2");
        assert_eq!(sign.parameters["b"], "extra");
        assert_eq!(sign.parameter_string().matches("a=").count(), 1);
    }

    #[test]
    fn test_extra_params_overwrite() {
        let sign = OAuthSignBuilder::new("ck")
            .oauth_token("tok")
            .add_param(OAUTH_PARAM_KEY_VERIFIER, "ver")
            .add_param(OAUTH_PARAM_KEY_TOKEN, "other")
            .sign(HttpMethod::Post, "https://api.example.com/x", "cs", "")
            .unwrap();
        assert_eq!(sign.parameters[OAUTH_PARAM_KEY_VERIFIER], "ver");
        assert_eq!(sign.parameters[OAUTH_PARAM_KEY_TOKEN], "other");
    }

    #[test]
    fn test_parameter_string_sorted_by_encoded_key() {
        let params = map(&[
            ("aZ", "1"),
            ("aé", "2"),
            ("b", "x y"),
            ("a b", "/"),
            ("A", "~"),
            ("_", "3"),
        ]);
        let param_str = to_parameter_string(&params);
        assert_eq!(
            param_str,
            "A=~&_=3&a%20b=%2F&a%C3%A9=2&aZ=1&b=x%20y"
        );

        let keys = param_str
            .split('&')
            .map(|pair| pair.split('=').next().unwrap().to_string())
            .collect::<Vec<String>>();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    proptest! {
        #[test]
        fn test_parameter_string_keys_strictly_ascending(params: BTreeMap<String, String>) {
            let param_str = to_parameter_string(&params);
            let keys = param_str
                .split('&')
                .filter(|pair| !pair.is_empty())
                .map(|pair| pair.split('=').next().unwrap_or(""))
                .collect::<Vec<&str>>();
            prop_assert_eq!(keys.len(), params.len());
            prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
