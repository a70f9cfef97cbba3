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

use super::mocks::{verified_alice, MockIdentityProvider};
use crate::{auth::AuthApi, errors::AuthError, routes::CalculateSpeedRoute, server::json_payload_config};

fn provider_accepting_any_token() -> MockIdentityProvider {
    let mut provider = MockIdentityProvider::new();
    provider.expect_verify_token().returning(|_| Ok(verified_alice()));
    provider
}

#[actix_web::test]
async fn calculation_without_a_token_is_unauthorized() {
    let _ = env_logger::try_init().ok();
    let provider = MockIdentityProvider::new();
    let (status, body) = post_request(provider, None, r#"{"initialSpeed": 60, "inclines": []}"#).await;
    assert_eq!(status.as_u16(), StatusCode::UNAUTHORIZED.as_u16());
    assert_eq!(body, r#"{"error":"Access token required"}"#);
}

#[actix_web::test]
async fn calculation_with_a_rejected_token_is_forbidden() {
    let mut provider = MockIdentityProvider::new();
    provider.expect_verify_token().returning(|_| Err(AuthError::InvalidToken));
    let (status, body) = post_request(provider, Some("Bearer expired.jwt"), r#"{"initialSpeed": 60, "inclines": []}"#).await;
    assert_eq!(status.as_u16(), StatusCode::FORBIDDEN.as_u16());
    assert_eq!(body, r#"{"error":"Invalid or expired token"}"#);
}

#[actix_web::test]
async fn uphill_then_downhill_sequence() {
    let provider = provider_accepting_any_token();
    let (status, body) =
        post_request(provider, Some("Bearer good.jwt"), r#"{"initialSpeed": 60, "inclines": [0, 30, 0, -45, 0]}"#).await;
    assert!(status.is_success());
    assert_eq!(body, r#"{"finalSpeed":75.0}"#);
}

#[actix_web::test]
async fn downhill_only_accumulates() {
    let provider = provider_accepting_any_token();
    let (status, body) =
        post_request(provider, Some("Bearer good.jwt"), r#"{"initialSpeed": 50, "inclines": [-10, -10]}"#).await;
    assert!(status.is_success());
    assert_eq!(body, r#"{"finalSpeed":70.0}"#);
}

#[actix_web::test]
async fn the_final_speed_is_clamped_at_zero() {
    let provider = provider_accepting_any_token();
    let (status, body) =
        post_request(provider, Some("Bearer good.jwt"), r#"{"initialSpeed": 10, "inclines": [20]}"#).await;
    assert!(status.is_success());
    assert_eq!(body, r#"{"finalSpeed":0.0}"#);
}

#[actix_web::test]
async fn null_incline_entries_are_dropped() {
    let provider = provider_accepting_any_token();
    let (status, body) =
        post_request(provider, Some("Bearer good.jwt"), r#"{"initialSpeed": 10, "inclines": [5, null, 5]}"#).await;
    assert!(status.is_success());
    assert_eq!(body, r#"{"finalSpeed":0.0}"#);
}

#[actix_web::test]
async fn rebound_sequences_keep_their_interim_deficit() {
    // The clamp applies once, at the end of the traversal. 5 - 20 = -15 mid-way, then +89 gives 74.
    let provider = provider_accepting_any_token();
    let (status, body) =
        post_request(provider, Some("Bearer good.jwt"), r#"{"initialSpeed": 5, "inclines": [20, -89]}"#).await;
    assert!(status.is_success());
    assert_eq!(body, r#"{"finalSpeed":74.0}"#);
}

#[actix_web::test]
async fn a_negative_initial_speed_is_rejected() {
    let provider = provider_accepting_any_token();
    let (status, body) =
        post_request(provider, Some("Bearer good.jwt"), r#"{"initialSpeed": -5, "inclines": []}"#).await;
    assert_eq!(status.as_u16(), StatusCode::BAD_REQUEST.as_u16());
    assert_eq!(body, r#"{"error":"Initial speed must be a non-negative number"}"#);
}

#[actix_web::test]
async fn a_vertical_incline_is_rejected_with_its_index() {
    let provider = provider_accepting_any_token();
    let (status, body) =
        post_request(provider, Some("Bearer good.jwt"), r#"{"initialSpeed": 10, "inclines": [90]}"#).await;
    assert_eq!(status.as_u16(), StatusCode::BAD_REQUEST.as_u16());
    assert!(body.contains("index 0"), "was: {body}");
    assert!(body.contains("90"), "was: {body}");
}

#[actix_web::test]
async fn malformed_json_is_rejected_before_validation() {
    // Note the trailing comma: the body never reaches the validator, let alone the token check of the payload
    // fields. The token itself is still verified by the middleware first.
    let provider = provider_accepting_any_token();
    let (status, body) =
        post_request(provider, Some("Bearer good.jwt"), r#"{"initialSpeed": 60, "inclines": [5,]}"#).await;
    assert_eq!(status.as_u16(), StatusCode::BAD_REQUEST.as_u16());
    assert_eq!(body, r#"{"error":"Invalid JSON format. Check for trailing commas or syntax errors."}"#);
}

fn configure_app(provider: MockIdentityProvider) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = AuthApi::new(provider, true);
        cfg.app_data(web::Data::new(api)).service(CalculateSpeedRoute::<MockIdentityProvider>::new());
    }
}

async fn post_request(provider: MockIdentityProvider, auth_header: Option<&str>, body: &str) -> (StatusCode, String) {
    let mut req = TestRequest::post()
        .uri("/calculate-speed")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body.to_owned());
    if let Some(header) = auth_header {
        req = req.insert_header(("Authorization", header));
    }
    let req = req.to_request();
    let app = App::new().app_data(json_payload_config()).configure(configure_app(provider));
    let app = test::init_service(app).await;
    debug!("Making request");
    // Middleware rejections surface as service errors; render them the way the server would.
    let res = match test::try_call_service(&app, req).await {
        Ok(res) => res.into_parts().1,
        Err(e) => e.error_response(),
    };
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}
