//! Cart route handlers.
//!
//! The cart lives in the session. Each handler loads it, applies one
//! operation, saves it back, and returns the updated cart, so the response
//! always reflects the new state.

use axum::{Json, extract::State};
use boutique_core::{Cart, CartLine, OrderSummary, Price, PricingRules, ProductId, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::extract::AppForm;
use crate::middleware::session::{load_cart, save_cart};
use crate::state::AppState;

/// A money amount with its display string.
#[derive(Debug, Clone, Serialize)]
pub struct MoneyView {
    pub amount: Decimal,
    pub display: String,
}

impl From<Price> for MoneyView {
    fn from(price: Price) -> Self {
        Self {
            amount: price.amount,
            display: price.display(),
        }
    }
}

/// Order summary display data.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    pub subtotal: MoneyView,
    pub shipping: MoneyView,
    pub tax: MoneyView,
    pub total: MoneyView,
    pub ships_free: bool,
    pub tax_label: String,
}

impl SummaryView {
    #[must_use]
    pub fn new(summary: &OrderSummary, rules: &PricingRules) -> Self {
        Self {
            subtotal: summary.subtotal.into(),
            shipping: summary.shipping.into(),
            tax: summary.tax.into(),
            total: summary.total.into(),
            ships_free: summary.ships_free(),
            tax_label: format!("Tax ({}%)", rules.tax_percent()),
        }
    }
}

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub unit_price: MoneyView,
    pub line_total: MoneyView,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product.id,
            name: line.product.name.clone(),
            image: line.product.image.clone(),
            size: line.selected_size.clone(),
            color: line.selected_color.clone(),
            quantity: line.quantity.get(),
            unit_price: line.product.unit_price().into(),
            line_total: line.line_total().into(),
        }
    }
}

/// Whether the cart has anything in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartState {
    Items,
    Empty,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub state: CartState,
    pub lines: Vec<CartLineView>,
    pub total_items: u64,
    pub summary: SummaryView,
}

impl CartView {
    #[must_use]
    pub fn new(cart: &Cart, rules: &PricingRules) -> Self {
        Self {
            state: if cart.is_empty() {
                CartState::Empty
            } else {
                CartState::Items
            },
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total_items: cart.total_items(),
            summary: SummaryView::new(&rules.summarize_cart(cart), rules),
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CartCountView {
    pub count: u64,
}

/// Add to cart form data.
///
/// Size and colour are optional together: leaving both out is the quick-add
/// from a product card and picks the product's first size and colour.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: Option<i64>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

/// Display cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartView::new(&cart, state.pricing())))
}

/// Add item to cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    AppForm(form): AppForm<AddToCartForm>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .get(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;
    let quantity = form.quantity.map_or(Quantity::ONE, Quantity::from_selector);

    let mut cart = load_cart(&session).await?;
    let line_quantity = match (form.size.as_deref(), form.color.as_deref()) {
        (Some(size), Some(color)) => cart.add(product, size, color, quantity)?,
        (None, None) => cart.add_default(product, quantity)?,
        _ => {
            return Err(AppError::BadRequest(
                "size and color must be chosen together".to_string(),
            ));
        }
    };
    save_cart(&session, &cart).await?;

    tracing::info!(
        product_id = %product.id,
        added = %quantity,
        line_quantity = %line_quantity,
        total_items = cart.total_items(),
        "Added to cart"
    );
    let product_id = product.id.to_string();
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", product_id.as_str())]),
    );

    Ok(Json(CartView::new(&cart, state.pricing())))
}

/// Update line quantity. Values below one leave the line at one.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    AppForm(form): AppForm<UpdateCartForm>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    if cart.update_quantity(form.product_id, &form.size, &form.color, form.quantity) {
        save_cart(&session, &cart).await?;
    } else {
        tracing::debug!(product_id = %form.product_id, "Update for a line not in the cart");
    }
    Ok(Json(CartView::new(&cart, state.pricing())))
}

/// Remove a line.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    AppForm(form): AppForm<RemoveFromCartForm>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    if cart.remove(form.product_id, &form.size, &form.color) {
        save_cart(&session, &cart).await?;
    } else {
        tracing::debug!(product_id = %form.product_id, "Remove for a line not in the cart");
    }
    Ok(Json(CartView::new(&cart, state.pricing())))
}

/// Empty the cart.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;
    Ok(Json(CartView::new(&cart, state.pricing())))
}

/// Cart item count for the header badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CartCountView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartCountView {
        count: cart.total_items(),
    }))
}
