//! Binds the Cognito client to the server's [`IdentityManagement`] contract.

use cognito_tools::{CognitoApi, CognitoApiError};
use log::debug;

use crate::{
    auth::{IdentityManagement, TokenSet, VerifiedUser},
    errors::AuthError,
};

impl IdentityManagement for CognitoApi {
    async fn register_user(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let response = self.sign_up(email, password).await.map_err(registration_error)?;
        Ok(response.user_sub)
    }

    async fn confirm_registration(&self, email: &str) -> Result<(), AuthError> {
        self.admin_confirm_sign_up(email).await.map_err(registration_error)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<TokenSet, AuthError> {
        let result = self.initiate_auth(email, password).await.map_err(login_error)?;
        Ok(TokenSet {
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            id_token: result.id_token,
            expires_in: result.expires_in,
        })
    }

    async fn verify_token(&self, token: &str) -> Result<VerifiedUser, AuthError> {
        let profile = self.get_user(token).await.map_err(|e| match e {
            CognitoApiError::NotAuthorized { message } => {
                debug!("Token verification failed. {message}");
                AuthError::InvalidToken
            },
            other => AuthError::ProviderUnavailable(other.to_string()),
        })?;
        let subject = profile.attribute("sub").map(str::to_string);
        let email = profile.attribute("email").map(str::to_string);
        Ok(VerifiedUser { username: profile.username, subject, email })
    }
}

fn registration_error(e: CognitoApiError) -> AuthError {
    match e {
        // Service faults here are things like UsernameExistsException or password-policy violations, all of which
        // the client can correct.
        CognitoApiError::ServiceError { message, .. } | CognitoApiError::NotAuthorized { message } => {
            AuthError::RegistrationFailed(message)
        },
        other => AuthError::ProviderUnavailable(other.to_string()),
    }
}

fn login_error(e: CognitoApiError) -> AuthError {
    match e {
        CognitoApiError::NotAuthorized { message } | CognitoApiError::ServiceError { message, .. } => {
            AuthError::InvalidCredentials(message)
        },
        other => AuthError::ProviderUnavailable(other.to_string()),
    }
}
