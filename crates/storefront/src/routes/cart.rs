//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart snapshot itself lives in the visitor's session; every mutation
//! loads it, applies one operation, and writes it back best-effort.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use bencom_core::{Cart, Customer, NewLineItem, format_order, wa_link};

use crate::cart_store;
use crate::content::Product;
use crate::filters;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_string(),
            item_count: 0,
        }
    }
}

/// Format a decimal amount as a price string.
fn format_price(amount: Decimal) -> String {
    format!("${amount:.2}")
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items
                .iter()
                .map(|line| CartItemView {
                    id: line.id.clone(),
                    title: line.title.clone(),
                    quantity: line.quantity,
                    price: format_price(line.price),
                    line_price: format_price(line.line_total()),
                    image: line.image.clone(),
                })
                .collect(),
            subtotal: format_price(cart.total()),
            item_count: cart.count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product: String,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub item_id: String,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub item_id: String,
}

/// Checkout form data (optional customer details for the order message).
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub error: Option<String>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = cart_store::load(&session).await;

    CartShowTemplate {
        cart: CartView::from(&cart),
        error: None,
    }
}

/// Add item to cart (HTMX).
///
/// The product is looked up in the catalog and its title, price, and image
/// are captured onto the line item as they are now; later catalog edits do
/// not rewrite carts. Returns the count badge with an HTMX trigger so other
/// fragments refresh.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let Some(product) = state.content().product(&form.product) else {
        tracing::warn!(product = %form.product, "Add to cart for unknown product");
        return (
            StatusCode::NOT_FOUND,
            Html("<span class=\"error\">Unknown product</span>"),
        )
            .into_response();
    };

    let mut cart = cart_store::load(&session).await;
    cart.add_item(new_line_item(product, form.quantity));
    cart_store::save(&session, &cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: cart.count(),
        },
    )
        .into_response()
}

/// Build the add-time line item snapshot for a catalog product.
fn new_line_item(product: &Product, quantity: Option<u32>) -> NewLineItem {
    NewLineItem {
        id: product.slug.clone(),
        title: product.meta.title.clone(),
        price: product.meta.price,
        image: product.meta.image.clone(),
        quantity,
    }
}

/// Update cart item quantity (HTMX). A quantity of zero removes the line.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> impl IntoResponse {
    let mut cart = cart_store::load(&session).await;
    cart.update_quantity(&form.item_id, form.quantity);
    cart_store::save(&session, &cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
}

/// Remove item from cart (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> impl IntoResponse {
    let mut cart = cart_store::load(&session).await;
    cart.remove_item(&form.item_id);
    cart_store::save(&session, &cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
}

/// Empty the cart (HTMX).
#[instrument(skip(session))]
pub async fn clear(session: Session) -> impl IntoResponse {
    let mut cart = cart_store::load(&session).await;
    cart.clear();
    cart_store::save(&session, &cart).await;

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = cart_store::load(&session).await;

    CartCountTemplate {
        count: cart.count(),
    }
}

/// Hand the order off to WhatsApp.
///
/// Formats the current cart as an order message and redirects to the
/// `wa.me` deep link; the browser performs the actual open. Refuses with a
/// visible message when the cart is empty or no destination number is
/// configured - in both cases the cart is left untouched.
#[instrument(skip(state, session))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Response {
    let cart = cart_store::load(&session).await;

    if cart.is_empty() {
        return checkout_refused(&cart, "Your cart is empty.");
    }

    let Some(number) = state.config().whatsapp_number.as_deref() else {
        tracing::warn!("Checkout attempted without a configured WhatsApp number");
        return checkout_refused(&cart, "Ordering is temporarily unavailable.");
    };

    let customer = Customer {
        name: form.name,
        email: form.email,
    };
    let text = format_order(&cart, &customer, Some(state.config().base_url.as_str()));
    let link = wa_link(number, &text);

    tracing::info!(items = cart.len(), "Order handed off to WhatsApp");
    Redirect::to(&link).into_response()
}

/// Render the cart page with a guard message instead of redirecting.
fn checkout_refused(cart: &Cart, message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        CartShowTemplate {
            cart: CartView::from(cart),
            error: Some(message.to_string()),
        },
    )
        .into_response()
}
