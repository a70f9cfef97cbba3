use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::{AuthError, ServerError};

/// The claims attached to a request once its bearer token has been verified by the identity provider.
///
/// Handlers receive a `VerifiedUser` through the `FromRequest` extractor; the bearer middleware is responsible for
/// putting it into the request extensions, so extraction can only fail on a route that isn't behind the middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedUser {
    pub username: String,
    pub subject: Option<String>,
    pub email: Option<String>,
}

impl FromRequest for VerifiedUser {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<VerifiedUser>().cloned();
        ready(user.ok_or(ServerError::AuthenticationError(AuthError::MissingToken)))
    }
}

/// The token bundle returned to a client on a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    /// Lifetime of the access token in seconds, when the provider reports one.
    pub expires_in: Option<u64>,
}

/// The `IdentityManagement` trait defines the contract with the external identity provider. The server never
/// inspects tokens itself; everything from registration to token verification is delegated through this interface,
/// which also lets the endpoint tests substitute a mock provider.
#[allow(async_fn_in_trait)]
pub trait IdentityManagement {
    /// Registers a new user and returns the provider's unique id for them.
    async fn register_user(&self, email: &str, password: &str) -> Result<String, AuthError>;
    /// Confirms a pending registration on the user's behalf.
    async fn confirm_registration(&self, email: &str) -> Result<(), AuthError>;
    /// Exchanges credentials for a token bundle.
    async fn authenticate(&self, email: &str, password: &str) -> Result<TokenSet, AuthError>;
    /// Checks an access token with the provider and returns the claims it carries.
    async fn verify_token(&self, token: &str) -> Result<VerifiedUser, AuthError>;
}

/// Unified API over the identity provider.
pub struct AuthApi<P> {
    provider: P,
    auto_confirm: bool,
}

impl<P> AuthApi<P>
where P: IdentityManagement
{
    pub fn new(provider: P, auto_confirm: bool) -> Self {
        Self { provider, auto_confirm }
    }

    /// Registers a new user and, when auto-confirmation is enabled, confirms them immediately so that they can log
    /// in without a verification round trip. A confirmation failure does not fail the registration; the user can
    /// still be confirmed out of band.
    pub async fn register(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let user_id = self.provider.register_user(email, password).await?;
        if self.auto_confirm {
            if let Err(e) = self.provider.confirm_registration(email).await {
                warn!("Could not auto-confirm a new user registration. {e}");
            }
        }
        Ok(user_id)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenSet, AuthError> {
        self.provider.authenticate(email, password).await
    }

    pub async fn verify_token(&self, token: &str) -> Result<VerifiedUser, AuthError> {
        self.provider.verify_token(token).await
    }
}
