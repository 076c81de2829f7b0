//! Checkout route handlers.
//!
//! The checkout flow is stored in the session next to the cart. Placing an
//! order hands it to the configured order sink; the cart is only emptied
//! once the sink has accepted the order.

use axum::{Json, extract::State};
use boutique_core::{
    Cart, CheckoutFlow, CheckoutStep, OrderConfirmation, PaymentMethod, PricingRules,
    ShippingDetails,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use super::cart::{CartLineView, CartView, SummaryView};
use crate::error::{Result, add_breadcrumb};
use crate::extract::AppForm;
use crate::middleware::session::{load_cart, load_checkout, save_cart, save_checkout};
use crate::state::AppState;

/// Checkout step display data.
#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub step: CheckoutStep,
    pub label: &'static str,
    pub complete: bool,
    pub current: bool,
}

/// Payment option display data.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentOptionView {
    pub value: PaymentMethod,
    pub label: &'static str,
    pub blurb: &'static str,
    pub selected: bool,
}

/// Checkout page data.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutView {
    pub step: CheckoutStep,
    pub steps: Vec<StepView>,
    pub shipping: ShippingDetails,
    pub payment_method: PaymentMethod,
    pub payment_options: Vec<PaymentOptionView>,
    pub cart: CartView,
}

impl CheckoutView {
    fn new(flow: &CheckoutFlow, cart: &Cart, rules: &PricingRules) -> Self {
        let current = flow.step();
        Self {
            step: current,
            steps: CheckoutStep::ALL
                .into_iter()
                .map(|step| StepView {
                    step,
                    label: step.label(),
                    complete: step < current,
                    current: step == current,
                })
                .collect(),
            shipping: flow.shipping.clone(),
            payment_method: flow.payment_method,
            payment_options: [PaymentMethod::Cod, PaymentMethod::Card]
                .into_iter()
                .map(|method| PaymentOptionView {
                    value: method,
                    label: method.label(),
                    blurb: method.blurb(),
                    selected: method == flow.payment_method,
                })
                .collect(),
            cart: CartView::new(cart, rules),
        }
    }
}

/// Order confirmation data.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmationView {
    pub order_number: String,
    pub email: String,
    pub customer_name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub payment_method: &'static str,
    pub lines: Vec<CartLineView>,
    pub total_items: u64,
    pub summary: SummaryView,
    pub estimated_delivery: NaiveDate,
}

impl ConfirmationView {
    fn new(confirmation: &OrderConfirmation, rules: &PricingRules) -> Self {
        let order = &confirmation.order;
        Self {
            order_number: order.number.to_string(),
            email: order.email.to_string(),
            customer_name: order.shipping.full_name(),
            address: order.shipping.address.clone(),
            city: order.shipping.city.clone(),
            country: order.shipping.country.clone(),
            payment_method: order.payment_method.label(),
            lines: order.lines.iter().map(CartLineView::from).collect(),
            total_items: order.total_items(),
            summary: SummaryView::new(&order.summary, rules),
            estimated_delivery: confirmation.estimated_delivery,
        }
    }
}

/// Payment step form data.
#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    pub payment_method: PaymentMethod,
}

async fn view(
    state: &AppState,
    session: &Session,
    flow: &CheckoutFlow,
) -> Result<Json<CheckoutView>> {
    let cart = load_cart(session).await?;
    Ok(Json(CheckoutView::new(flow, &cart, state.pricing())))
}

/// Display checkout state.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CheckoutView>> {
    let flow = load_checkout(&session).await?;
    view(&state, &session, &flow).await
}

/// Save the shipping form. Validation happens when moving to the next step.
#[instrument(skip(state, session, form))]
pub async fn shipping(
    State(state): State<AppState>,
    session: Session,
    AppForm(form): AppForm<ShippingDetails>,
) -> Result<Json<CheckoutView>> {
    let mut flow = load_checkout(&session).await?;
    flow.shipping = form;
    save_checkout(&session, &flow).await?;
    view(&state, &session, &flow).await
}

/// Choose the payment method.
#[instrument(skip(state, session))]
pub async fn payment(
    State(state): State<AppState>,
    session: Session,
    AppForm(form): AppForm<PaymentForm>,
) -> Result<Json<CheckoutView>> {
    let mut flow = load_checkout(&session).await?;
    flow.payment_method = form.payment_method;
    save_checkout(&session, &flow).await?;
    view(&state, &session, &flow).await
}

/// Advance to the next step.
#[instrument(skip(state, session))]
pub async fn next(State(state): State<AppState>, session: Session) -> Result<Json<CheckoutView>> {
    let mut flow = load_checkout(&session).await?;
    let outcome = flow.next()?;
    tracing::debug!(?outcome, "Checkout step");
    save_checkout(&session, &flow).await?;
    view(&state, &session, &flow).await
}

/// Go back one step.
#[instrument(skip(state, session))]
pub async fn back(State(state): State<AppState>, session: Session) -> Result<Json<CheckoutView>> {
    let mut flow = load_checkout(&session).await?;
    flow.back();
    save_checkout(&session, &flow).await?;
    view(&state, &session, &flow).await
}

/// Place the order.
#[instrument(skip(state, session))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ConfirmationView>> {
    let mut cart = load_cart(&session).await?;
    let mut flow = load_checkout(&session).await?;

    let confirmation = flow.place_order(&mut cart, state.pricing(), state.orders(), Utc::now())?;

    save_cart(&session, &cart).await?;
    save_checkout(&session, &flow).await?;

    add_breadcrumb(
        "checkout",
        "Order confirmed",
        Some(&[("order_number", confirmation.order.number.as_str())]),
    );

    Ok(Json(ConfirmationView::new(&confirmation, state.pricing())))
}
