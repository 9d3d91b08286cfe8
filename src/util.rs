use percent_encoding::{utf8_percent_encode, AsciiSet};
use std::collections::BTreeMap;
use url::{form_urlencoded, Url};

use crate::error::{Error, Result};

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
const TARGETS_FOR_PARAMS: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `input` leaving only the RFC 3986 unreserved set untouched.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, TARGETS_FOR_PARAMS).to_string()
}

/// Split a target URL into the endpoint used for signing and its decoded query pairs.
///
/// The endpoint has no query or fragment; scheme and host come back lowercased and
/// a default port is dropped.
pub fn url_to_endpoint_and_queries(url: &str) -> Result<(String, Vec<(String, String)>)> {
    let mut parsed = Url::parse(url).map_err(|source| Error::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    let queries = parsed.query_pairs().into_owned().collect();
    parsed.set_query(None);
    parsed.set_fragment(None);
    Ok((parsed.into(), queries))
}

/// Parse a `key=value&key2=value2` body into a flat map.
///
/// The first non-blank value of a key wins. A segment without `=`, or a key that is
/// not a plain form token (empty, or holding whitespace, control characters or
/// markup such as `<` and `"`), makes the whole body malformed.
pub fn qs_to_dict(qs: &str) -> Result<BTreeMap<String, String>> {
    let qs = qs.trim();
    if let Some(segment) = qs.split('&').find(|s| !s.is_empty() && !s.contains('=')) {
        return Err(Error::malformed(format!(
            "query segment `{}` has no value",
            segment
        )));
    }

    let mut map = BTreeMap::new();
    for (k, v) in form_urlencoded::parse(qs.as_bytes()) {
        if !is_form_token(&k) {
            return Err(Error::malformed(format!("`{}` is not a form key", k)));
        }
        if v.is_empty() {
            continue;
        }
        map.entry(k.into_owned()).or_insert_with(|| v.into_owned());
    }
    Ok(map)
}

fn is_form_token(key: &str) -> bool {
    !key.is_empty()
        && !key
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || "<>\"'{}".contains(c))
}
