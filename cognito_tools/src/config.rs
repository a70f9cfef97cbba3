use log::*;
use gsc_common::Secret;

/// Identity-provider configuration.
///
/// A `CognitoConfig` is constructed explicitly at process start and handed to [`CognitoApi::new`][crate::CognitoApi],
/// so there is exactly one place where the environment is read. Nothing in this crate lazily re-reads env vars.
#[derive(Debug, Clone, Default)]
pub struct CognitoConfig {
    pub region: String,
    pub user_pool_id: String,
    pub client_id: String,
    /// Only set when the app client was created with a secret; used to compute the `SecretHash` request field.
    pub client_secret: Option<Secret<String>>,
    /// IAM credentials for admin operations (`AdminConfirmSignUp`). The client API calls do not use them.
    pub access_key_id: String,
    pub secret_access_key: Secret<String>,
}

impl CognitoConfig {
    pub fn new_from_env_or_default() -> Self {
        let region = std::env::var("GSC_AWS_REGION").unwrap_or_else(|_| {
            warn!("GSC_AWS_REGION not set, using us-east-1 as default");
            "us-east-1".to_string()
        });
        let user_pool_id = std::env::var("GSC_COGNITO_USER_POOL_ID").unwrap_or_else(|_| {
            error!("GSC_COGNITO_USER_POOL_ID is not set. Please set it to the id of your Cognito user pool.");
            String::default()
        });
        let client_id = std::env::var("GSC_COGNITO_CLIENT_ID").unwrap_or_else(|_| {
            error!("GSC_COGNITO_CLIENT_ID is not set. Please set it to the id of your Cognito app client.");
            String::default()
        });
        let client_secret = std::env::var("GSC_COGNITO_CLIENT_SECRET").ok().map(Secret::new);
        if client_secret.is_none() {
            info!("GSC_COGNITO_CLIENT_SECRET not set. Assuming the app client has no secret.");
        }
        let access_key_id = std::env::var("GSC_AWS_ACCESS_KEY_ID").unwrap_or_else(|_| {
            warn!("GSC_AWS_ACCESS_KEY_ID not set. Admin operations against the user pool will fail.");
            String::default()
        });
        let secret_access_key = Secret::new(std::env::var("GSC_AWS_SECRET_ACCESS_KEY").unwrap_or_else(|_| {
            warn!("GSC_AWS_SECRET_ACCESS_KEY not set. Admin operations against the user pool will fail.");
            String::default()
        }));
        Self { region, user_pool_id, client_id, client_secret, access_key_id, secret_access_key }
    }

    /// The regional service endpoint, e.g. `https://cognito-idp.us-east-1.amazonaws.com/`.
    pub fn endpoint(&self) -> String {
        format!("https://cognito-idp.{}.amazonaws.com/", self.region)
    }

    pub fn host(&self) -> String {
        format!("cognito-idp.{}.amazonaws.com", self.region)
    }
}
