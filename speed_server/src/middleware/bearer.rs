//! Bearer-token authentication middleware for Actix Web.
//!
//! This middleware can be placed on any route or service.
//!
//! It reads the access token from the `Authorization: Bearer <token>` header and asks the identity provider to
//! verify it. On success the verified claims are inserted into the request extensions, where handlers pick them up
//! via the [`VerifiedUser`][crate::auth::VerifiedUser] extractor. A missing token produces a 401 response; a token
//! the provider rejects produces a 403.
//!
//! The middleware is generic over the [`IdentityManagement`] implementation so that endpoint tests can run it
//! against a mock provider.

use std::{
    future::{ready, Ready},
    marker::PhantomData,
    rc::Rc,
};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorInternalServerError,
    web,
    Error,
    HttpMessage,
};
use futures::future::LocalBoxFuture;
use log::{debug, trace, warn};

use crate::{
    auth::{AuthApi, IdentityManagement},
    errors::{AuthError, ServerError},
    helpers::get_bearer_token,
};

pub struct BearerAuthMiddlewareFactory<P> {
    _provider: PhantomData<fn() -> P>,
}

impl<P> BearerAuthMiddlewareFactory<P> {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self { _provider: PhantomData }
    }
}

impl<S, B, P> Transform<S, ServiceRequest> for BearerAuthMiddlewareFactory<P>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    P: IdentityManagement + 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = BearerAuthMiddlewareService<S, P>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddlewareService { service: Rc::new(service), _provider: PhantomData }))
    }
}

pub struct BearerAuthMiddlewareService<S, P> {
    service: Rc<S>,
    _provider: PhantomData<fn() -> P>,
}

impl<S, B, P> Service<ServiceRequest> for BearerAuthMiddlewareService<S, P>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    P: IdentityManagement + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<B>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let api = req
                .app_data::<web::Data<AuthApi<P>>>()
                .ok_or_else(|| {
                    warn!("No identity provider found in app data");
                    ErrorInternalServerError("Identity provider is not configured")
                })?
                .clone();
            let token = get_bearer_token(req.headers())
                .ok_or_else(|| Error::from(ServerError::AuthenticationError(AuthError::MissingToken)))?;
            trace!("Verifying bearer token with the identity provider");
            let user = api.verify_token(&token).await.map_err(ServerError::AuthenticationError)?;
            debug!("Bearer token verified for {}", user.username);
            req.extensions_mut().insert(user);
            service.call(req).await
        })
    }
}
