use actix_web::http::header::{self, HeaderMap};
use log::trace;

/// Extracts the access token from an `Authorization: Bearer <token>` header, if one is present and well-formed.
pub fn get_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        trace!("Authorization header carried an empty bearer token");
        return None;
    }
    Some(token.to_string())
}
