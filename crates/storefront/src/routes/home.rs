//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::content::{Product, Service};
use crate::filters;
use crate::state::AppState;

// =============================================================================
// Hero Configuration (Static content for the carousel)
// =============================================================================

/// A single slide in the hero carousel.
#[derive(Clone)]
pub struct HeroSlide {
    pub title: String,
    pub subtitle: Option<String>,
    pub button_text: String,
    pub button_url: String,
    pub image_path: String,
    pub image_alt: String,
}

/// Hero carousel configuration.
///
/// One carousel, one pagination scheme; the slides advance on a timer and
/// the current index is clamped client-side.
#[derive(Clone)]
pub struct HeroConfig {
    pub slides: Vec<HeroSlide>,
    pub autoplay_ms: u32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            slides: vec![
                HeroSlide {
                    title: "Maintenance you can call today".to_string(),
                    subtitle: Some(
                        "Drain clearing, minor works, and building upkeep for businesses and homes."
                            .to_string(),
                    ),
                    button_text: "See our services".to_string(),
                    button_url: "/services".to_string(),
                    image_path: "/static/images/hero/crew.jpg".to_string(),
                    image_alt: "Maintenance crew at work".to_string(),
                },
                HeroSlide {
                    title: "Equipment and parts, delivered".to_string(),
                    subtitle: Some("Order from the catalog and send it over WhatsApp.".to_string()),
                    button_text: "Browse products".to_string(),
                    button_url: "/products".to_string(),
                    image_path: "/static/images/hero/workshop.jpg".to_string(),
                    image_alt: "Workshop shelves with equipment".to_string(),
                },
            ],
            autoplay_ms: 5000,
        }
    }
}

/// Number of products featured on the home page.
const FEATURED_PRODUCTS: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Hero carousel configuration.
    pub hero: HeroConfig,
    /// Service categories in display order.
    pub services: Vec<Service>,
    /// A few products from the top of the catalog.
    pub featured_products: Vec<Product>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let services = state.content().services().to_vec();
    let featured_products = state
        .content()
        .products()
        .iter()
        .take(FEATURED_PRODUCTS)
        .cloned()
        .collect();

    HomeTemplate {
        hero: HeroConfig::default(),
        services,
        featured_products,
    }
}
