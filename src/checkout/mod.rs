//! Checkout
//!
//! Turns the cart into an order request and hands it to an
//! `OrderProcessor`. The cart is cleared only once the processor confirms
//! the order; a declined or unavailable checkout leaves it untouched.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::cart::{CartLedger, LineItem, LineItemId};
use crate::domain::{GarmentSize, Money, QualityTier, TemplateId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    CartEmpty,

    #[error("Checkout is not available: {0}")]
    Unavailable(String),

    #[error("Order was declined: {0}")]
    Declined(String),
}

/// One order line, copied from a cart item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: LineItemId,
    pub name: String,
    pub template_id: TemplateId,
    pub quality: QualityTier,
    pub size: GarmentSize,
    pub design_id: Option<String>,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

impl From<&LineItem> for OrderLine {
    fn from(item: &LineItem) -> Self {
        OrderLine {
            item_id: item.id(),
            name: item.name.clone(),
            template_id: item.template_id,
            quality: item.quality,
            size: item.size,
            design_id: item.design_id.clone(),
            quantity: item.quantity(),
            unit_price: item.unit_price,
            line_total: item.line_total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub lines: Vec<OrderLine>,
    pub total: Money,
}

impl OrderRequest {
    pub fn from_cart(cart: &CartLedger) -> Self {
        OrderRequest {
            lines: cart.items().iter().map(OrderLine::from).collect(),
            total: cart.total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: String,
}

/// Commerce backend that accepts orders
#[async_trait]
pub trait OrderProcessor: Send + Sync {
    async fn submit(&self, order: &OrderRequest) -> Result<OrderConfirmation, CheckoutError>;
}

/// Processor used while no commerce backend is connected; declines every
/// order so carts are never silently dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableCheckout;

#[async_trait]
impl OrderProcessor for UnavailableCheckout {
    async fn submit(&self, _order: &OrderRequest) -> Result<OrderConfirmation, CheckoutError> {
        Err(CheckoutError::Unavailable(
            "no commerce backend is configured".to_string(),
        ))
    }
}

/// Submit the cart; clears it only on confirmation
pub async fn checkout<P: OrderProcessor + ?Sized>(
    cart: &mut CartLedger,
    processor: &P,
) -> Result<OrderConfirmation, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::CartEmpty);
    }

    let order = OrderRequest::from_cart(cart);
    info!(lines = order.lines.len(), total = %order.total, "Submitting order");

    match processor.submit(&order).await {
        Ok(confirmation) => {
            info!(order_id = %confirmation.order_id, "Order confirmed, clearing cart");
            cart.clear();
            Ok(confirmation)
        }
        Err(e) => {
            warn!(error = %e, "Checkout failed, cart kept");
            Err(e)
        }
    }
}
