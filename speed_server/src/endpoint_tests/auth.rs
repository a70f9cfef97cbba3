use actix_web::{
    body::MessageBody,
    http::StatusCode,
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use log::*;
use serde_json::{json, Value};

use super::mocks::MockIdentityProvider;
use crate::{
    auth::{AuthApi, TokenSet},
    errors::AuthError,
    routes::{LoginRoute, RegisterRoute},
    server::json_payload_config,
};

#[actix_web::test]
async fn register_succeeds_and_auto_confirms() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockIdentityProvider::new();
    provider.expect_register_user().returning(|_, _| Ok("uuid-1234".to_string()));
    provider.expect_confirm_registration().times(1).returning(|_| Ok(()));
    let (status, body) =
        post_request(provider, "/auth/register", json!({"email": "alice@example.com", "password": "hunter22"})).await;
    info!("Response body: {body}");
    assert!(status.is_success());
    assert!(body.contains("Registration successful. You can now login."), "was: {body}");
    assert!(body.contains(r#""userSub":"uuid-1234""#), "was: {body}");
}

#[actix_web::test]
async fn register_without_a_password_is_rejected() {
    let provider = MockIdentityProvider::new();
    let (status, body) = post_request(provider, "/auth/register", json!({"email": "alice@example.com"})).await;
    assert_eq!(status.as_u16(), StatusCode::BAD_REQUEST.as_u16());
    assert_eq!(body, r#"{"error":"Email and password are required"}"#);
}

#[actix_web::test]
async fn register_with_an_existing_user_is_a_client_error() {
    let mut provider = MockIdentityProvider::new();
    provider
        .expect_register_user()
        .returning(|_, _| Err(AuthError::RegistrationFailed("User already exists".to_string())));
    let (status, body) =
        post_request(provider, "/auth/register", json!({"email": "alice@example.com", "password": "hunter22"})).await;
    assert_eq!(status.as_u16(), StatusCode::BAD_REQUEST.as_u16());
    assert_eq!(body, r#"{"error":"User already exists"}"#);
}

#[actix_web::test]
async fn register_succeeds_even_when_confirmation_fails() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockIdentityProvider::new();
    provider.expect_register_user().returning(|_, _| Ok("uuid-5678".to_string()));
    provider
        .expect_confirm_registration()
        .returning(|_| Err(AuthError::ProviderUnavailable("connection reset".to_string())));
    let (status, body) =
        post_request(provider, "/auth/register", json!({"email": "bob@example.com", "password": "hunter22"})).await;
    assert!(status.is_success(), "was: {body}");
    assert!(body.contains("uuid-5678"), "was: {body}");
}

#[actix_web::test]
async fn login_returns_the_token_bundle() {
    let mut provider = MockIdentityProvider::new();
    provider.expect_authenticate().returning(|_, _| {
        Ok(TokenSet {
            access_token: "access.jwt".to_string(),
            refresh_token: Some("refresh.jwt".to_string()),
            id_token: Some("id.jwt".to_string()),
            expires_in: Some(3600),
        })
    });
    let (status, body) =
        post_request(provider, "/auth/login", json!({"email": "alice@example.com", "password": "hunter22"})).await;
    assert!(status.is_success());
    assert!(body.contains("Login successful"), "was: {body}");
    assert!(body.contains(r#""accessToken":"access.jwt""#), "was: {body}");
    assert!(body.contains(r#""refreshToken":"refresh.jwt""#), "was: {body}");
    assert!(body.contains(r#""idToken":"id.jwt""#), "was: {body}");
    assert!(body.contains(r#""expiresIn":3600"#), "was: {body}");
}

#[actix_web::test]
async fn login_with_bad_credentials_is_unauthorized() {
    let mut provider = MockIdentityProvider::new();
    provider
        .expect_authenticate()
        .returning(|_, _| Err(AuthError::InvalidCredentials("Incorrect username or password.".to_string())));
    let (status, body) =
        post_request(provider, "/auth/login", json!({"email": "alice@example.com", "password": "nope"})).await;
    assert_eq!(status.as_u16(), StatusCode::UNAUTHORIZED.as_u16());
    assert_eq!(body, r#"{"error":"Incorrect username or password."}"#);
}

#[actix_web::test]
async fn login_without_credentials_is_rejected() {
    let provider = MockIdentityProvider::new();
    let (status, body) = post_request(provider, "/auth/login", json!({})).await;
    assert_eq!(status.as_u16(), StatusCode::BAD_REQUEST.as_u16());
    assert_eq!(body, r#"{"error":"Email and password are required"}"#);
}

fn configure_app(provider: MockIdentityProvider) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = AuthApi::new(provider, true);
        cfg.app_data(web::Data::new(api)).service(
            web::scope("/auth")
                .service(RegisterRoute::<MockIdentityProvider>::new())
                .service(LoginRoute::<MockIdentityProvider>::new()),
        );
    }
}

async fn post_request(provider: MockIdentityProvider, path: &str, body: Value) -> (StatusCode, String) {
    let req = TestRequest::post().uri(path).set_json(&body).to_request();
    let app = App::new().app_data(json_payload_config()).configure(configure_app(provider));
    let app = test::init_service(app).await;
    debug!("Making request");
    let (_, res) = test::call_service(&app, req).await.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}
