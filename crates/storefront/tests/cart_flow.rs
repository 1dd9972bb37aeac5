//! End-to-end cart flow tests driving the real router.
//!
//! Each test builds the full application (routes, session layer, middleware)
//! and exercises it request by request, carrying the session cookie between
//! calls the way a browser would.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

use bencom_storefront::config::SiteConfig;
use bencom_storefront::content::ContentStore;
use bencom_storefront::routes;
use bencom_storefront::state::AppState;

fn test_app() -> Router {
    let config = SiteConfig {
        host: "127.0.0.1".parse().expect("ip"),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        whatsapp_number: Some("+54 9 11 2779-7320".to_string()),
        email: None,
        sentry_dsn: None,
        sentry_environment: None,
    };

    let content_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("content");
    let content = ContentStore::load(&content_dir).expect("content loads");
    let state = AppState::new(config, content).expect("state builds");

    routes::app(state, concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

fn form_request(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

fn session_cookie(response: &Response<axum::body::Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(String::from)
        .expect("session cookie")
}

async fn body_text(response: Response<axum::body::Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

#[tokio::test]
async fn add_to_cart_updates_count_across_requests() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(form_request("/cart/add", "product=kit-c&quantity=2", None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("HX-Trigger")
            .and_then(|v| v.to_str().ok()),
        Some("cart-updated")
    );

    let cookie = session_cookie(&response);
    let badge = body_text(response).await;
    assert!(badge.contains(">2</span>"), "badge was: {badge}");

    // The cart survives into the next request via the session cookie
    let response = app
        .clone()
        .oneshot(get_request("/cart/count", Some(&cookie)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let badge = body_text(response).await;
    assert!(badge.contains(">2</span>"), "badge was: {badge}");
}

#[tokio::test]
async fn add_accumulates_quantity_for_same_product() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(form_request("/cart/add", "product=kit-c&quantity=2", None))
        .await
        .expect("response");
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(form_request(
            "/cart/add",
            "product=kit-c&quantity=3",
            Some(&cookie),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let badge = body_text(response).await;
    assert!(badge.contains(">5</span>"), "badge was: {badge}");
}

#[tokio::test]
async fn add_unknown_product_is_rejected() {
    let app = test_app();

    let response = app
        .oneshot(form_request("/cart/add", "product=no-such-thing", None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_to_zero_removes_the_line() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(form_request("/cart/add", "product=kit-c", None))
        .await
        .expect("response");
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(form_request(
            "/cart/update",
            "item_id=kit-c&quantity=0",
            Some(&cookie),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let fragment = body_text(response).await;
    assert!(fragment.contains("Your cart is empty."), "was: {fragment}");
}

#[tokio::test]
async fn clear_empties_the_cart() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(form_request("/cart/add", "product=equipo-a&quantity=4", None))
        .await
        .expect("response");
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(form_request("/cart/clear", "", Some(&cookie)))
        .await
        .expect("response");
    let fragment = body_text(response).await;
    assert!(fragment.contains("Your cart is empty."), "was: {fragment}");
}

#[tokio::test]
async fn checkout_with_empty_cart_is_refused() {
    let app = test_app();

    let response = app
        .oneshot(form_request("/cart/checkout", "", None))
        .await
        .expect("response");

    // Guard: no redirect to the deep link, just the cart page with a notice
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.headers().get(header::LOCATION).is_none());
    let page = body_text(response).await;
    assert!(page.contains("Your cart is empty."), "was: {page}");
}

#[tokio::test]
async fn checkout_redirects_to_whatsapp_and_keeps_the_cart() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(form_request("/cart/add", "product=kit-c&quantity=2", None))
        .await
        .expect("response");
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(form_request(
            "/cart/checkout",
            "name=Laura&email=laura%40example.com",
            Some(&cookie),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("redirect location");
    assert!(
        location.starts_with("https://wa.me/5491127797320?text="),
        "location was: {location}"
    );
    assert!(location.contains("Kit%20C"), "location was: {location}");
    assert!(location.contains("Laura"), "location was: {location}");

    // Hand-off does not consume the cart
    let response = app
        .clone()
        .oneshot(get_request("/cart/count", Some(&cookie)))
        .await
        .expect("response");
    let badge = body_text(response).await;
    assert!(badge.contains(">2</span>"), "badge was: {badge}");
}

#[tokio::test]
async fn contact_rejects_invalid_email() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/contact/send")
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-forwarded-for", "127.0.0.1")
                .body(Body::from(
                    r#"{"name":"Laura","email":"not-an-email","subject":"","message":"Hello there"}"#,
                ))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_text(response).await;
    assert!(body.contains("valid email"), "was: {body}");
}

#[tokio::test]
async fn contact_without_relay_is_unavailable() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/contact/send")
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-forwarded-for", "127.0.0.1")
                .body(Body::from(
                    r#"{"name":"Laura","email":"laura@example.com","subject":"Quote","message":"Hello there"}"#,
                ))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert!(body.contains("temporarily unavailable"), "was: {body}");
}
