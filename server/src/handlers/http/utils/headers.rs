use hyper::header::{AUTHORIZATION, HeaderMap};
use tracing::debug;

/// Extract the access token from the Authorization header.
///
/// The `Bearer` scheme is matched case-insensitively. A header that is present
/// but not a well-formed Bearer credential is passed on whole, so it is
/// rejected as an invalid token rather than read as no token at all.
pub fn get_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?;
    let raw = String::from_utf8_lossy(value.as_bytes());
    let raw = raw.trim();

    match raw.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
            debug!("Bearer token extracted");
            Some(token.trim().to_string())
        }
        _ => {
            debug!("Malformed Authorization header");
            Some(raw.to_string())
        }
    }
}

/// Pick the access token for a request: the body's `accessToken` field wins,
/// otherwise the Bearer header. A present-but-empty body field is kept as
/// `Some("")` so it is rejected as an invalid token.
pub fn extract_access_token(body_token: Option<String>, headers: &HeaderMap) -> Option<String> {
    body_token.or_else(|| get_bearer_token(headers))
}
