use actix_web::{body::MessageBody, test, test::TestRequest, App};

use crate::routes::{health, index};

#[actix_web::test]
async fn the_health_check_responds() {
    let app = test::init_service(App::new().service(health)).await;
    let req = TestRequest::get().uri("/health").to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());
}

#[actix_web::test]
async fn the_banner_carries_a_route_reference() {
    let app = test::init_service(App::new().service(index)).await;
    let req = TestRequest::get().uri("/").to_request();
    let (_, res) = test::call_service(&app, req).await.into_parts();
    assert!(res.status().is_success());
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    assert!(body.contains("Gaming Speed Calculator API"), "was: {body}");
    assert!(body.contains(r#""calculateSpeed":"POST /calculate-speed""#), "was: {body}");
    assert!(body.contains(r#""health":"GET /health""#), "was: {body}");
}
