//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause
//! the current worker to stop processing new requests. For this reason any long, non-cpu-bound operation (e.g. the
//! identity provider calls) must be expressed as futures or asynchronous functions, which worker threads execute
//! concurrently. The speed calculation itself is a short, pure, synchronous computation and is fine to run inline.

use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use serde_json::Value;
use speed_engine::{calculate_final_speed, validate_speed_request};

use crate::{
    auth::{AuthApi, IdentityManagement, VerifiedUser},
    data_objects::{CredentialsRequest, LoginResponse, RegisterResponse},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal verified_by $bounds:ty) => {
        paste::paste! { pub struct [<$name:camel Route>]<TProvider>(core::marker::PhantomData<fn() -> TProvider>);}
        paste::paste! { impl<TProvider> [<$name:camel Route>]<TProvider> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> TProvider>)
            }
        }}
        paste::paste! { impl<TProvider> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<TProvider>
        where
            TProvider: $bounds + 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name)
                    .wrap($crate::middleware::BearerAuthMiddlewareFactory::<TProvider>::new());
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ----------------------------------------------   Banner  ----------------------------------------------------
/// Service banner: the API name and a static route reference, in lieu of a generated docs UI.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Gaming Speed Calculator API",
        "endpoints": {
            "health": "GET /health",
            "register": "POST /auth/register",
            "login": "POST /auth/login",
            "calculateSpeed": "POST /calculate-speed",
        },
    }))
}

//----------------------------------------------   Auth  ----------------------------------------------------
route!(register => Post "/register" impl IdentityManagement);
/// Route handler for the registration endpoint
///
/// Registers a new user with the identity provider. When auto-confirmation is enabled (the default), the new user
/// is confirmed immediately and can log in straight away; a confirmation failure is logged but does not fail the
/// registration.
pub async fn register<TIdentityManagement>(
    api: web::Data<AuthApi<TIdentityManagement>>,
    body: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, ServerError>
where
    TIdentityManagement: IdentityManagement,
{
    trace!("💻️ Received registration request");
    let (email, password) = body.into_inner().into_credentials()?;
    let user_sub = api.register(&email, &password).await?;
    debug!("💻️ Registered new user {user_sub}");
    let response =
        RegisterResponse { message: "Registration successful. You can now login.".to_string(), user_sub };
    Ok(HttpResponse::Ok().json(response))
}

route!(login => Post "/login" impl IdentityManagement);
/// Route handler for the login endpoint
///
/// Exchanges an email and password for the token bundle issued by the identity provider. The access token from the
/// bundle is what clients present to the protected calculation endpoint.
pub async fn login<TIdentityManagement>(
    api: web::Data<AuthApi<TIdentityManagement>>,
    body: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, ServerError>
where
    TIdentityManagement: IdentityManagement,
{
    trace!("💻️ Received login request");
    let (email, password) = body.into_inner().into_credentials()?;
    let tokens = api.login(&email, &password).await?;
    debug!("💻️ Login successful");
    let response = LoginResponse {
        message: "Login successful".to_string(),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        id_token: tokens.id_token,
        expires_in: tokens.expires_in,
    };
    Ok(HttpResponse::Ok().json(response))
}

//----------------------------------------------   Speed  ----------------------------------------------------
route!(calculate_speed => Post "/calculate-speed" verified_by IdentityManagement);
/// Route handler for the speed calculation endpoint
///
/// The body is taken as raw JSON and run through the engine's validator, so that field-level problems surface as
/// the engine's own descriptive errors rather than generic deserialization failures. Malformed JSON never reaches
/// this handler; the transport layer rejects it first.
pub async fn calculate_speed(user: VerifiedUser, body: web::Json<Value>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received speed calculation request from {}", user.username);
    let request = validate_speed_request(&body)?;
    let result = calculate_final_speed(&request);
    debug!("💻️ Calculated final speed {} for {}", result.final_speed, user.username);
    Ok(HttpResponse::Ok().json(result))
}
