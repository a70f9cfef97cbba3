use std::sync::Arc;

use chrono::Utc;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{
    config::CognitoConfig,
    data_objects::{AuthenticationResult, InitiateAuthResponse, SignUpResponse, UserProfile},
    helpers::secret_hash,
    sigv4::{sign_post_request, SigningKeys},
    CognitoApiError,
};

const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";

#[derive(Clone)]
pub struct CognitoApi {
    config: CognitoConfig,
    client: Arc<Client>,
}

impl CognitoApi {
    pub fn new(config: CognitoConfig) -> Result<Self, CognitoApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Content-Type", HeaderValue::from_static(CONTENT_TYPE));
        let client =
            Client::builder().default_headers(headers).build().map_err(|e| CognitoApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn config(&self) -> &CognitoConfig {
        &self.config
    }

    /// Sends one AWS JSON 1.1 operation and deserializes the response. Admin operations are SigV4-signed with the
    /// configured IAM credentials; client operations go out unsigned.
    async fn target_query<T: DeserializeOwned>(
        &self,
        operation: &str,
        body: Value,
        admin: bool,
    ) -> Result<T, CognitoApiError> {
        let target = format!("{TARGET_PREFIX}.{operation}");
        let body = body.to_string();
        trace!("Sending {target} query");
        let mut req = self.client.post(self.config.endpoint()).header("X-Amz-Target", &target);
        if admin {
            let keys = SigningKeys {
                access_key_id: &self.config.access_key_id,
                secret_access_key: self.config.secret_access_key.reveal(),
                region: &self.config.region,
            };
            let signed = sign_post_request(&keys, &self.config.host(), &target, CONTENT_TYPE, &body, Utc::now())?;
            req = req.header("X-Amz-Date", signed.amz_date).header("Authorization", signed.authorization);
        }
        let response = req.body(body).send().await.map_err(|e| CognitoApiError::RequestError(e.to_string()))?;
        if response.status().is_success() {
            trace!("{target} query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| CognitoApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| CognitoApiError::RequestError(e.to_string()))?;
            Err(service_error(status, &body))
        }
    }

    /// Registers a new user in the pool. The returned `user_sub` is the provider's unique id for the user.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpResponse, CognitoApiError> {
        let mut body = json!({
            "ClientId": self.config.client_id,
            "Username": email,
            "Password": password,
        });
        if let Some(secret) = &self.config.client_secret {
            body["SecretHash"] = secret_hash(secret.reveal(), email, &self.config.client_id)?.into();
        }
        debug!("Registering new user with the identity provider");
        let response = self.target_query::<SignUpResponse>("SignUp", body, false).await?;
        info!("Registered new user {}", response.user_sub);
        Ok(response)
    }

    /// Confirms a registration on the user's behalf. Requires IAM credentials with `AdminConfirmSignUp` permission.
    pub async fn admin_confirm_sign_up(&self, email: &str) -> Result<(), CognitoApiError> {
        let body = json!({
            "UserPoolId": self.config.user_pool_id,
            "Username": email,
        });
        debug!("Confirming user registration");
        self.target_query::<Value>("AdminConfirmSignUp", body, true).await?;
        info!("Confirmed user registration");
        Ok(())
    }

    /// Authenticates with email and password via the `USER_PASSWORD_AUTH` flow and returns the issued tokens.
    pub async fn initiate_auth(&self, email: &str, password: &str) -> Result<AuthenticationResult, CognitoApiError> {
        let mut auth_parameters = json!({
            "USERNAME": email,
            "PASSWORD": password,
        });
        if let Some(secret) = &self.config.client_secret {
            auth_parameters["SECRET_HASH"] = secret_hash(secret.reveal(), email, &self.config.client_id)?.into();
        }
        let body = json!({
            "AuthFlow": "USER_PASSWORD_AUTH",
            "ClientId": self.config.client_id,
            "AuthParameters": auth_parameters,
        });
        debug!("Authenticating user with the identity provider");
        let response = self.target_query::<InitiateAuthResponse>("InitiateAuth", body, false).await?;
        match response.authentication_result {
            Some(result) => Ok(result),
            // MFA and password-reset challenges are not part of the supported flows
            None => {
                let challenge = response.challenge_name.unwrap_or_else(|| "unknown challenge".to_string());
                Err(CognitoApiError::NotAuthorized {
                    message: format!("Authentication requires a further challenge: {challenge}"),
                })
            },
        }
    }

    /// Verifies an access token by asking the provider for the profile it belongs to. An invalid or expired token
    /// fails with [`CognitoApiError::NotAuthorized`].
    pub async fn get_user(&self, access_token: &str) -> Result<UserProfile, CognitoApiError> {
        let body = json!({ "AccessToken": access_token });
        trace!("Verifying access token with the identity provider");
        self.target_query("GetUser", body, false).await
    }
}

fn service_error(status: u16, body: &str) -> CognitoApiError {
    let parsed = serde_json::from_str::<Value>(body).unwrap_or_default();
    let kind = parsed["__type"].as_str().unwrap_or("UnknownError").to_string();
    let message = parsed["message"]
        .as_str()
        .or_else(|| parsed["Message"].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("The identity provider returned HTTP {status}"));
    if ["NotAuthorized", "ExpiredToken", "UserNotFound"].iter().any(|k| kind.contains(k)) {
        CognitoApiError::NotAuthorized { message }
    } else {
        CognitoApiError::ServiceError { kind, message }
    }
}
