//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Catalog & content
//! GET  /products               - Product listing
//! GET  /services               - Service category listing
//! GET  /services/{slug}        - Service category page
//! GET  /pages/{slug}           - Static markdown page
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add item (returns count badge, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! POST /cart/clear             - Empty the cart (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//! POST /cart/checkout          - Redirect to the WhatsApp deep link
//!
//! # Contact
//! GET  /contact                - Contact page
//! POST /contact/send           - Relay a submission over SMTP (rate limited)
//! ```

pub mod cart;
pub mod contact;
pub mod home;
pub mod pages;
pub mod products;
pub mod services;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::middleware;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
        .route("/checkout", post(cart::checkout))
}

/// Create the service routes router.
pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(services::index))
        .route("/{slug}", get(services::show))
}

/// Create the contact routes router.
///
/// The relay endpoint sits behind a strict per-IP rate limit since every
/// request triggers an SMTP send.
pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/", get(contact::show)).route(
        "/send",
        post(contact::send).layer(middleware::contact_rate_limiter()),
    )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog & content
        .route("/products", get(products::index))
        .nest("/services", service_routes())
        .route("/pages/{slug}", get(pages::show))
        // Cart routes
        .nest("/cart", cart_routes())
        // Contact routes
        .nest("/contact", contact_routes())
}

/// Assemble the full application: routes, static files, sessions, and the
/// inner middleware stack.
///
/// Sentry layers are added by the binary so tests drive the same app
/// without an error-tracking dependency.
pub fn app(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(middleware::create_session_layer(state.config()))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}
