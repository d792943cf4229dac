//! # Cart Commands
//!
//! Commands that open the cart store. Every mutation is persisted by the
//! store before the command returns.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add   ┌──────────┐  cart   ┌──────────────────────────┐  │
//! │  │  Empty   │───────►│ In Cart  │────────►│ lines + totals + notice  │  │
//! │  │  Cart    │        │          │         │ (checkout not available) │  │
//! │  └──────────┘        └──────────┘         └──────────────────────────┘  │
//! │       ▲                   │                                             │
//! │       │              add (same key: quantity += n)                      │
//! │       │              update (≤ 0 removes)                               │
//! │       │              remove                                             │
//! │       │                   │                                             │
//! │       └──── clear ────────┘                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use layerline_core::validation::validate_quantity;
use layerline_core::{
    CartLineItem, CartTotals, CoreError, Money, PurchaseType, SelectedOptions, SizeOption,
    CHECKOUT_NOTICE,
};
use layerline_store::Storage;
use serde::Serialize;
use tracing::{debug, warn};

use super::product::resolve_material;
use crate::error::CliResult;
use crate::state::Session;

// =============================================================================
// Responses
// =============================================================================

/// One cart line as displayed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub purchase_type: PurchaseType,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_options: Option<SelectedOptions>,
}

impl From<&CartLineItem> for CartLineView {
    fn from(item: &CartLineItem) -> Self {
        CartLineView {
            product_id: item.product.id.clone(),
            name: item.product.name.clone(),
            purchase_type: item.purchase_type,
            quantity: item.quantity,
            unit_price: item.unit_price(),
            line_total: item.line_total(),
            selected_options: item.selected_options.clone(),
        }
    }
}

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineView>,
    pub totals: CartTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CartResponse {
    fn snapshot<S: Storage>(session: &Session<S>) -> Self {
        CartResponse {
            items: session.cart.items().iter().map(CartLineView::from).collect(),
            totals: session.cart.totals(),
            message: None,
        }
    }

    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Display for CartResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            write!(f, "Cart is empty")?;
        } else {
            write!(f, "Cart ({} items)", self.totals.total_items)?;
            for line in &self.items {
                write!(
                    f,
                    "\n  {:>3} × {:<28} {:<5} {:>14}",
                    line.quantity,
                    line.name,
                    line.purchase_type.as_str(),
                    line.line_total.to_string()
                )?;
                if let Some(options) = &line.selected_options {
                    write!(f, "\n        {}", describe_options(options))?;
                }
            }
            write!(f, "\n{:<42} {:>14}", "Subtotal", self.totals.subtotal.to_string())?;
            write!(f, "\n{:<42} {:>14}", "Shipping", self.totals.shipping.to_string())?;
            write!(f, "\n{:<42} {:>14}", "Total", self.totals.total.to_string())?;
        }

        if let Some(message) = &self.message {
            write!(f, "\n{}", message)?;
        }
        Ok(())
    }
}

fn describe_options(options: &SelectedOptions) -> String {
    let mut parts = Vec::new();
    if let Some(material) = &options.material {
        parts.push(material.name.to_string());
    }
    if let Some(color) = &options.color {
        parts.push(color.name.clone());
    }
    if let Some(size) = options.size {
        parts.push(size.to_string());
    }
    parts.join(" / ")
}

// =============================================================================
// Commands
// =============================================================================

/// Arguments for [`add_to_cart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    pub product_id: String,
    pub purchase_type: PurchaseType,
    pub quantity: i64,
    pub material: Option<String>,
    pub color: Option<String>,
    pub size: Option<SizeOption>,
}

impl AddRequest {
    pub fn new(product_id: impl Into<String>, purchase_type: PurchaseType, quantity: i64) -> Self {
        AddRequest {
            product_id: product_id.into(),
            purchase_type,
            quantity,
            material: None,
            color: None,
            size: None,
        }
    }

    fn has_print_options(&self) -> bool {
        self.material.is_some() || self.color.is_some() || self.size.is_some()
    }
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - The product must exist and be sold in the requested form
/// - Quantity must be positive
/// - `print` lines carry material, color and size; unset choices take the
///   product page preselection (first supported material, first color,
///   Medium)
/// - `file` lines carry no options
/// - Line already in cart: quantity increases, its options stay as they were
pub fn add_to_cart<S: Storage>(
    session: &mut Session<S>,
    request: AddRequest,
) -> CliResult<CartResponse> {
    debug!(
        product_id = %request.product_id,
        purchase_type = %request.purchase_type,
        quantity = request.quantity,
        "add command"
    );

    validate_quantity(request.quantity)?;

    let catalog = &session.catalog;
    let product = catalog.require_product(&request.product_id)?;
    if !product.offers(request.purchase_type) {
        return Err(CoreError::PurchaseTypeUnavailable {
            product_id: product.id.clone(),
            purchase_type: request.purchase_type,
        }
        .into());
    }

    let mut item = CartLineItem::new(product.clone(), request.purchase_type, request.quantity);

    match request.purchase_type {
        PurchaseType::Print => {
            let material = resolve_material(catalog, product, request.material.as_deref())?;
            let color = match request.color.as_deref() {
                Some(id) => Some(catalog.require_color(id)?),
                None => catalog.default_color(),
            };
            item = item.with_options(SelectedOptions {
                material: Some(material.clone()),
                color: color.cloned(),
                size: Some(request.size.unwrap_or_default()),
            });
        }
        PurchaseType::File => {
            if request.has_print_options() {
                warn!(product_id = %product.id, "print options ignored for file purchase");
            }
        }
    }

    session.cart.add_item(item);
    Ok(CartResponse::snapshot(session))
}

/// Removes the line keyed by `(product_id, purchase_type)`. Absent lines
/// are a no-op.
pub fn remove_from_cart<S: Storage>(
    session: &mut Session<S>,
    product_id: &str,
    purchase_type: PurchaseType,
) -> CartResponse {
    debug!(product_id = %product_id, purchase_type = %purchase_type, "remove command");

    let removed = session.cart.remove_item(product_id, purchase_type);
    let response = CartResponse::snapshot(session);
    if removed {
        response
    } else {
        response.with_message(not_in_cart(product_id, purchase_type))
    }
}

/// Sets a line's quantity; `quantity <= 0` removes the line.
pub fn update_cart_item<S: Storage>(
    session: &mut Session<S>,
    product_id: &str,
    purchase_type: PurchaseType,
    quantity: i64,
) -> CartResponse {
    debug!(
        product_id = %product_id,
        purchase_type = %purchase_type,
        quantity = quantity,
        "update command"
    );

    let touched = session.cart.update_quantity(product_id, purchase_type, quantity);
    let response = CartResponse::snapshot(session);
    if touched {
        response
    } else {
        response.with_message(not_in_cart(product_id, purchase_type))
    }
}

/// Empties the cart.
pub fn clear_cart<S: Storage>(session: &mut Session<S>) -> CartResponse {
    debug!("clear command");
    session.cart.clear_cart();
    CartResponse::snapshot(session)
}

/// Current cart with totals and the checkout notice.
pub fn get_cart<S: Storage>(session: &Session<S>) -> CartResponse {
    CartResponse::snapshot(session).with_message(CHECKOUT_NOTICE)
}

fn not_in_cart(product_id: &str, purchase_type: PurchaseType) -> String {
    format!("No {} line for {} in cart", purchase_type, product_id)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use layerline_core::{Catalog, MaterialType};
    use layerline_store::{CartStore, MemoryStorage};

    fn session() -> Session<MemoryStorage> {
        Session::new(Catalog::demo(), CartStore::open(MemoryStorage::new()))
    }

    #[test]
    fn test_add_file_line_accumulates() {
        let mut session = session();
        add_to_cart(&mut session, AddRequest::new("spiral-vase", PurchaseType::File, 1)).unwrap();
        let response =
            add_to_cart(&mut session, AddRequest::new("spiral-vase", PurchaseType::File, 2))
                .unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].quantity, 3);
        assert!(response.items[0].selected_options.is_none());
        // 60 000 × 3, no shipping for files
        assert_eq!(response.totals.subtotal, Money::from_units(180_000));
        assert_eq!(response.totals.shipping, Money::zero());
    }

    #[test]
    fn test_add_print_line_uses_preselection() {
        let mut session = session();
        let response =
            add_to_cart(&mut session, AddRequest::new("miniature-knight", PurchaseType::Print, 1))
                .unwrap();

        let options = response.items[0].selected_options.as_ref().unwrap();
        assert_eq!(options.material.as_ref().unwrap().name, MaterialType::Resin);
        assert_eq!(options.color.as_ref().unwrap().id, "white");
        assert_eq!(options.size, Some(SizeOption::Medium));

        // Unit price is the print base price; shipping applies once.
        assert_eq!(response.totals.subtotal, Money::from_units(90_000));
        assert_eq!(response.totals.shipping, Money::from_units(30_000));
        assert_eq!(response.totals.total, Money::from_units(120_000));
    }

    #[test]
    fn test_add_print_line_with_choices() {
        let mut session = session();
        let mut request = AddRequest::new("spiral-vase", PurchaseType::Print, 2);
        request.material = Some("petg".to_string());
        request.color = Some("blue".to_string());
        request.size = Some(SizeOption::Large);

        let response = add_to_cart(&mut session, request).unwrap();
        let options = response.items[0].selected_options.as_ref().unwrap();
        assert_eq!(options.material.as_ref().unwrap().id, "petg");
        assert_eq!(options.color.as_ref().unwrap().id, "blue");
        assert_eq!(options.size, Some(SizeOption::Large));
    }

    #[test]
    fn test_readd_keeps_first_options() {
        let mut session = session();
        let mut first = AddRequest::new("spiral-vase", PurchaseType::Print, 1);
        first.size = Some(SizeOption::Small);
        add_to_cart(&mut session, first).unwrap();

        let mut second = AddRequest::new("spiral-vase", PurchaseType::Print, 1);
        second.size = Some(SizeOption::Large);
        let response = add_to_cart(&mut session, second).unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].quantity, 2);
        let options = response.items[0].selected_options.as_ref().unwrap();
        assert_eq!(options.size, Some(SizeOption::Small));
    }

    #[test]
    fn test_add_rejections() {
        let mut session = session();

        let err = add_to_cart(&mut session, AddRequest::new("nope", PurchaseType::File, 1))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err =
            add_to_cart(&mut session, AddRequest::new("cable-organizer", PurchaseType::Print, 1))
                .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_to_cart(&mut session, AddRequest::new("spiral-vase", PurchaseType::File, 0))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let mut request = AddRequest::new("miniature-knight", PurchaseType::Print, 1);
        request.material = Some("pla".to_string());
        let err = add_to_cart(&mut session, request).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let mut request = AddRequest::new("spiral-vase", PurchaseType::Print, 1);
        request.color = Some("plaid".to_string());
        let err = add_to_cart(&mut session, request).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        assert!(session.cart.items().is_empty());
    }

    #[test]
    fn test_update_and_remove() {
        let mut session = session();
        add_to_cart(&mut session, AddRequest::new("spiral-vase", PurchaseType::File, 1)).unwrap();
        add_to_cart(&mut session, AddRequest::new("planter-hex", PurchaseType::Print, 1)).unwrap();

        let response = update_cart_item(&mut session, "spiral-vase", PurchaseType::File, 4);
        assert_eq!(response.totals.total_items, 5);
        assert!(response.message.is_none());

        let response = update_cart_item(&mut session, "planter-hex", PurchaseType::Print, 0);
        assert_eq!(response.items.len(), 1);
        assert!(!response.totals.has_physical_items);

        let response = remove_from_cart(&mut session, "planter-hex", PurchaseType::Print);
        assert_eq!(
            response.message.as_deref(),
            Some("No print line for planter-hex in cart")
        );

        let response = remove_from_cart(&mut session, "spiral-vase", PurchaseType::File);
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_clear_and_get_cart() {
        let mut session = session();
        add_to_cart(&mut session, AddRequest::new("phone-stand", PurchaseType::Print, 2)).unwrap();

        let response = get_cart(&session);
        assert_eq!(response.message.as_deref(), Some(CHECKOUT_NOTICE));
        let text = response.to_string();
        assert!(text.contains("Adjustable Phone Stand"));
        assert!(text.contains("Shipping"));
        assert!(text.ends_with(CHECKOUT_NOTICE));

        let response = clear_cart(&mut session);
        assert!(response.items.is_empty());
        assert_eq!(response.totals.total, Money::zero());
    }

    #[test]
    fn test_mutations_reach_storage() {
        let mut session = session();
        add_to_cart(&mut session, AddRequest::new("spiral-vase", PurchaseType::File, 1)).unwrap();

        let storage = session.close();
        let reopened = CartStore::open(storage);
        assert_eq!(reopened.items().len(), 1);
    }
}
