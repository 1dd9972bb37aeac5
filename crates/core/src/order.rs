//! Order message formatting for the WhatsApp hand-off.
//!
//! Turns a cart plus optional customer details into the multi-line text the
//! business receives. Pure string building; the caller decides where the
//! text goes.

use crate::cart::Cart;

/// Optional customer details collected in the cart drawer.
///
/// Free text only - nothing here is checked against any identity system, and
/// the values are not persisted with the cart.
#[derive(Debug, Clone, Default)]
pub struct Customer {
    /// Customer name, possibly empty.
    pub name: String,
    /// Customer email, possibly empty.
    pub email: String,
}

impl Customer {
    /// Customer with both fields blank.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
        }
    }
}

/// Render the cart as a human-readable order message.
///
/// Layout: an intro line, `Customer:` / `Email:` lines when the fields are
/// non-empty, a blank separator, one line per cart item in cart order, the
/// total, and a trailing attribution line when a site URL is configured.
#[must_use]
pub fn format_order(cart: &Cart, customer: &Customer, site_url: Option<&str>) -> String {
    let mut lines = Vec::new();

    lines.push("New order from the website:".to_string());
    let name = customer.name.trim();
    if !name.is_empty() {
        lines.push(format!("Customer: {name}"));
    }
    let email = customer.email.trim();
    if !email.is_empty() {
        lines.push(format!("Email: {email}"));
    }

    lines.push(String::new());
    lines.push("Products:".to_string());
    for item in &cart.items {
        lines.push(format!(
            "- {} x{} — ${:.2}",
            item.title,
            item.quantity,
            item.line_total()
        ));
    }

    lines.push(String::new());
    lines.push(format!("Total: ${:.2}", cart.total()));

    if let Some(site) = site_url.filter(|s| !s.is_empty()) {
        lines.push(String::new());
        lines.push(format!("Order placed from: {site}"));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::cart::NewLineItem;

    fn kit_c_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(NewLineItem {
            id: "p-3".to_string(),
            title: "Kit C".to_string(),
            price: Decimal::from(780),
            image: None,
            quantity: Some(2),
        });
        cart
    }

    #[test]
    fn test_format_is_deterministic() {
        let cart = kit_c_cart();
        let first = format_order(&cart, &Customer::anonymous(), None);
        let second = format_order(&cart, &Customer::anonymous(), None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_item_line_and_total() {
        let cart = kit_c_cart();
        let text = format_order(&cart, &Customer::anonymous(), None);

        assert!(text.lines().any(|l| l == "- Kit C x2 — $1560.00"));
        assert!(text.ends_with("Total: $1560.00"));
    }

    #[test]
    fn test_customer_lines_only_when_present() {
        let cart = kit_c_cart();

        let anonymous = format_order(&cart, &Customer::anonymous(), None);
        assert!(!anonymous.contains("Customer:"));
        assert!(!anonymous.contains("Email:"));

        let customer = Customer {
            name: "Laura Paz".to_string(),
            email: "laura@example.com".to_string(),
        };
        let full = format_order(&cart, &customer, None);
        assert!(full.lines().any(|l| l == "Customer: Laura Paz"));
        assert!(full.lines().any(|l| l == "Email: laura@example.com"));
    }

    #[test]
    fn test_whitespace_only_customer_fields_are_skipped() {
        let cart = kit_c_cart();
        let customer = Customer {
            name: "   ".to_string(),
            email: String::new(),
        };
        let text = format_order(&cart, &customer, None);
        assert!(!text.contains("Customer:"));
    }

    #[test]
    fn test_attribution_line_when_site_configured() {
        let cart = kit_c_cart();

        let text = format_order(&cart, &Customer::anonymous(), Some("https://bencom.com.ar"));
        assert!(text.ends_with("Order placed from: https://bencom.com.ar"));

        let empty_site = format_order(&cart, &Customer::anonymous(), Some(""));
        assert!(empty_site.ends_with("Total: $1560.00"));
    }

    #[test]
    fn test_multiple_items_in_cart_order() {
        let mut cart = Cart::new();
        cart.add_item(NewLineItem {
            id: "p-1".to_string(),
            title: "Equipo A".to_string(),
            price: Decimal::from(1200),
            image: None,
            quantity: Some(1),
        });
        cart.add_item(NewLineItem {
            id: "p-2".to_string(),
            title: "Repuesto B".to_string(),
            price: Decimal::from(350),
            image: None,
            quantity: Some(2),
        });

        let text = format_order(&cart, &Customer::anonymous(), None);
        let lines: Vec<&str> = text.lines().collect();
        let first = lines
            .iter()
            .position(|l| *l == "- Equipo A x1 — $1200.00")
            .expect("first item line");
        let second = lines
            .iter()
            .position(|l| *l == "- Repuesto B x2 — $700.00")
            .expect("second item line");
        assert!(first < second);
        assert!(text.ends_with("Total: $1900.00"));
    }
}
