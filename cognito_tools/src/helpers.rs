use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::CognitoApiError;

type HmacSha256 = Hmac<Sha256>;

/// The Cognito `SecretHash` request field: HMAC-SHA256 over `username + client_id`, keyed with the app client
/// secret and base64-encoded.
pub fn secret_hash(client_secret: &str, username: &str, client_id: &str) -> Result<String, CognitoApiError> {
    let mut mac =
        HmacSha256::new_from_slice(client_secret.as_bytes()).map_err(|e| CognitoApiError::SigningError(e.to_string()))?;
    mac.update(username.as_bytes());
    mac.update(client_id.as_bytes());
    Ok(base64::encode(mac.finalize().into_bytes()))
}
