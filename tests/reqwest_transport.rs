#![cfg(feature = "reqwest")]

use httpmock::prelude::*;
use twitter_auth::{ClientConfig, Endpoints, OAuthClient, ReqwestTransport};

fn client(base_url: &str) -> OAuthClient<ReqwestTransport> {
    OAuthClient::with_transport(
        "ck",
        "cs",
        ClientConfig::default().endpoints(Endpoints::with_base(base_url)),
        ReqwestTransport::new(),
    )
}

#[test]
fn request_token_round_trip() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/oauth/request_token")
            .header("content-type", "application/x-www-form-urlencoded")
            .header("user-agent", "HTTP Client")
            .header_exists("authorization");
        then.status(200)
            .body("oauth_token=tok&oauth_token_secret=sec&oauth_callback_confirmed=true");
    });

    let map = client(&server.base_url())
        .request_token("http://127.0.0.1:8888/p/authenticate/twitter")
        .expect("Request token call should succeed against the mock server.");

    mock.assert();
    assert_eq!(map["oauth_token"], "tok");
    assert_eq!(map["oauth_callback_confirmed"], "true");
}

#[test]
fn timeline_sends_params_in_query() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/1.1/statuses/user_timeline.json")
            .query_param("screen_name", "_mru_")
            .query_param("count", "2")
            .query_param("oauth_token", "at")
            .query_param("oauth_signature_method", "HMAC-SHA1")
            .query_param_exists("oauth_signature")
            .header_exists("authorization");
        then.status(200).body(r#"[{"id":1}]"#);
    });

    let body = client(&server.base_url())
        .request_statuses_user_timeline("at", "ats", [("screen_name", "_mru_"), ("count", "2")])
        .expect("Timeline call should succeed against the mock server.");

    mock.assert();
    assert_eq!(body, r#"[{"id":1}]"#);
}

#[test]
fn error_status_still_returns_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/1.1/account/verify_credentials.json");
        then.status(401)
            .body(r#"{"errors":[{"code":32,"message":"Could not authenticate you."}]}"#);
    });

    let body = client(&server.base_url())
        .request_account_verify_credentials("at", "ats", [("include_email", "true")])
        .expect("A received non-2xx response should still yield its body.");

    mock.assert();
    assert!(body.contains("Could not authenticate you."));
}

#[test]
fn connection_failure_yields_none() {
    // nothing listens on port 1
    let client = client("http://127.0.0.1:1");

    assert!(client.request_token("oob").is_none());
    assert!(client.request_access_token("tmp", "ver").is_none());
    assert!(client
        .request_account_verify_credentials("at", "ats", [("skip_status", "true")])
        .is_none());
}
