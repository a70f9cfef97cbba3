//! Minimal AWS Signature Version 4 signing, specialised for the JSON 1.1 `POST /` requests this crate makes.
//!
//! Only the headers that participate in every Cognito admin call are signed: `content-type`, `host`, `x-amz-date`
//! and `x-amz-target`. There is no query string and the path is always `/`, which removes the canonicalisation
//! edge cases of the general algorithm.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::CognitoApiError;

type HmacSha256 = Hmac<Sha256>;

const SERVICE: &str = "cognito-idp";
const ALGORITHM: &str = "AWS4-HMAC-SHA256";

pub(crate) struct SigningKeys<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
    pub region: &'a str,
}

/// The two headers the caller must attach to the outgoing request.
pub(crate) struct SignedHeaders {
    pub amz_date: String,
    pub authorization: String,
}

pub(crate) fn sign_post_request(
    keys: &SigningKeys<'_>,
    host: &str,
    target: &str,
    content_type: &str,
    body: &str,
    now: DateTime<Utc>,
) -> Result<SignedHeaders, CognitoApiError> {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = now.format("%Y%m%d").to_string();
    let payload_hash = hex_digest(body.as_bytes());
    let canonical_headers =
        format!("content-type:{content_type}\nhost:{host}\nx-amz-date:{amz_date}\nx-amz-target:{target}\n");
    let signed_headers = "content-type;host;x-amz-date;x-amz-target";
    let canonical_request = format!("POST\n/\n\n{canonical_headers}\n{signed_headers}\n{payload_hash}");
    let credential_scope = format!("{date_stamp}/{}/{SERVICE}/aws4_request", keys.region);
    let string_to_sign =
        format!("{ALGORITHM}\n{amz_date}\n{credential_scope}\n{}", hex_digest(canonical_request.as_bytes()));

    let k_date = hmac(format!("AWS4{}", keys.secret_access_key).as_bytes(), date_stamp.as_bytes())?;
    let k_region = hmac(&k_date, keys.region.as_bytes())?;
    let k_service = hmac(&k_region, SERVICE.as_bytes())?;
    let k_signing = hmac(&k_service, b"aws4_request")?;
    let signature = hex(&hmac(&k_signing, string_to_sign.as_bytes())?);

    let authorization = format!(
        "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={signed_headers}, Signature={signature}",
        keys.access_key_id
    );
    Ok(SignedHeaders { amz_date, authorization })
}

fn hmac(key: &[u8], data: &[u8]) -> Result<Vec<u8>, CognitoApiError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| CognitoApiError::SigningError(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn hex_digest(data: &[u8]) -> String {
    hex(&Sha256::digest(data))
}
