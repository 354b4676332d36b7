//! Cart ledger
//!
//! Ordered line items, each a frozen snapshot of a customization taken when
//! it was added. Items never point back at the session or template, so
//! later changes to either do not alter what is already in the cart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{GarmentSize, Money, QualityTier, TemplateId};
use crate::session::CustomizationSession;

/// Largest quantity a single line item may hold
pub const MAX_QUANTITY: u32 = 99;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("No template selected")]
    NoSelection,

    #[error("Maximum quantity is {max}, requested {requested}")]
    QuantityLimit { requested: i64, max: u32 },
}

/// Unique identity of a line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(Uuid);

impl LineItemId {
    fn generate() -> Self {
        LineItemId(Uuid::new_v4())
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One cart entry. Only `quantity` changes after creation, and only
/// through `CartLedger::set_quantity`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    id: LineItemId,
    pub name: String,
    pub unit_price: Money,
    pub template_id: TemplateId,
    pub template_key: String,
    pub quality: QualityTier,
    pub size: GarmentSize,
    /// Uploaded design or template art shown in the cart
    pub design_preview: Option<String>,
    /// Backend design id when the upload was confirmed
    pub design_id: Option<String>,
    quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    pub fn id(&self) -> LineItemId {
        self.id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Outcome of a quantity change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated(u32),
    Removed,
    /// No item with that id
    Missing,
}

#[derive(Debug, Clone, Default)]
pub struct CartLedger {
    items: Vec<LineItem>,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the session into a new line item with quantity 1
    pub fn add_item(&mut self, session: &CustomizationSession) -> Result<&LineItem, CartError> {
        let template = session.template().ok_or(CartError::NoSelection)?;

        let item = LineItem {
            id: LineItemId::generate(),
            name: template.name.clone(),
            unit_price: session.current_price(),
            template_id: template.id,
            template_key: template.template_key.clone(),
            quality: session.quality(),
            size: session.size(),
            design_preview: session.preview_ref(),
            design_id: session.design().and_then(|d| d.server_id.clone()),
            quantity: 1,
            added_at: Utc::now(),
        };

        info!(
            item_id = %item.id,
            template_id = %item.template_id,
            quality = %item.quality,
            size = %item.size,
            unit_price = %item.unit_price,
            "Added item to cart"
        );

        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Remove an item; absent ids are ignored
    pub fn remove_item(&mut self, id: LineItemId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        debug!(item_id = %id, "Removed item from cart");
        Some(self.items.remove(index))
    }

    /// Change an item's quantity.
    ///
    /// Anything below 1 removes the item. Above `MAX_QUANTITY` is rejected
    /// and the stored quantity is kept.
    pub fn set_quantity(&mut self, id: LineItemId, quantity: i64) -> Result<QuantityChange, CartError> {
        if quantity < 1 {
            return Ok(match self.remove_item(id) {
                Some(_) => QuantityChange::Removed,
                None => QuantityChange::Missing,
            });
        }

        if quantity > i64::from(MAX_QUANTITY) {
            return Err(CartError::QuantityLimit {
                requested: quantity,
                max: MAX_QUANTITY,
            });
        }

        let quantity = quantity as u32;
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(QuantityChange::Updated(quantity))
            }
            None => Ok(QuantityChange::Missing),
        }
    }

    pub fn get(&self, id: LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all items
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{expand_templates, fallback_base_product};
    use crate::domain::{FileMeta, Template};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn template() -> Arc<Template> {
        Arc::new(expand_templates(&fallback_base_product()).remove(0))
    }

    fn open_session() -> CustomizationSession {
        let mut session = CustomizationSession::new();
        session.open(template());
        session
    }

    #[test]
    fn test_add_without_template_fails() {
        let mut cart = CartLedger::new();
        let session = CustomizationSession::new();

        assert_eq!(cart.add_item(&session).unwrap_err(), CartError::NoSelection);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_snapshots_session() {
        let mut cart = CartLedger::new();
        let mut session = open_session();
        session.set_quality(QualityTier::Heavyweight);
        session.set_size(GarmentSize::AdultXl);

        let id = cart.add_item(&session).unwrap().id();

        // Later session changes must not reach the cart
        session.set_quality(QualityTier::Performance);
        session.set_size(GarmentSize::YouthS);

        let item = cart.get(id).unwrap();
        assert_eq!(item.quantity(), 1);
        assert_eq!(item.unit_price, Money::from_cents(2199));
        assert_eq!(item.quality, QualityTier::Heavyweight);
        assert_eq!(item.size, GarmentSize::AdultXl);
        assert_eq!(item.template_key, "front-logo");
        assert_eq!(item.design_preview.as_deref(), Some("img/templates/voll1_sample.jpg"));
        assert_eq!(item.design_id, None);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut cart = CartLedger::new();
        let session = open_session();
        for _ in 0..50 {
            cart.add_item(&session).unwrap();
        }
        let ids: HashSet<LineItemId> = cart.items().iter().map(LineItem::id).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_quantity_zero_removes() {
        let mut cart = CartLedger::new();
        let session = open_session();
        let id = cart.add_item(&session).unwrap().id();

        assert_eq!(cart.set_quantity(id, 0), Ok(QuantityChange::Removed));
        assert!(cart.is_empty());

        let id = cart.add_item(&session).unwrap().id();
        assert_eq!(cart.set_quantity(id, -3), Ok(QuantityChange::Removed));
        assert_eq!(cart.set_quantity(id, 0), Ok(QuantityChange::Missing));
    }

    #[test]
    fn test_quantity_above_limit_rejected() {
        let mut cart = CartLedger::new();
        let session = open_session();
        let id = cart.add_item(&session).unwrap().id();
        cart.set_quantity(id, 5).unwrap();

        assert_eq!(
            cart.set_quantity(id, 100),
            Err(CartError::QuantityLimit { requested: 100, max: 99 })
        );
        assert_eq!(cart.get(id).unwrap().quantity(), 5);

        assert_eq!(cart.set_quantity(id, 99), Ok(QuantityChange::Updated(99)));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = CartLedger::new();
        let session = open_session();
        cart.add_item(&session).unwrap();

        assert!(cart.remove_item(LineItemId::generate()).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_total() {
        let mut cart = CartLedger::new();
        assert_eq!(cart.total(), Money::ZERO);

        let mut session = open_session();
        let first = cart.add_item(&session).unwrap().id();
        session.set_quality(QualityTier::Performance);
        cart.add_item(&session).unwrap();
        cart.set_quantity(first, 2).unwrap();

        assert_eq!(cart.total(), Money::from_cents(6397));
        assert_eq!(cart.total().to_string(), "$63.97");
        assert_eq!(cart.unit_count(), 3);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::ZERO);
    }

    fn session_priced_at(base_price: f64) -> CustomizationSession {
        let base = crate::backend::BaseProduct {
            base_price: Some(base_price),
            ..Default::default()
        };
        let mut session = CustomizationSession::new();
        session.open(Arc::new(expand_templates(&base).remove(0)));
        session
    }

    #[test]
    fn test_huge_backend_price_totals_without_overflow() {
        let session = session_priced_at(1e17);
        let mut cart = CartLedger::new();
        let id = cart.add_item(&session).unwrap().id();
        cart.set_quantity(id, 2).unwrap();
        assert_eq!(cart.total(), Money::from_cents(3998));

        let session = session_priced_at(1_000_000.0);
        let mut cart = CartLedger::new();
        let mut ids = Vec::new();
        for _ in 0..10 {
            ids.push(cart.add_item(&session).unwrap().id());
        }
        for id in ids {
            cart.set_quantity(id, 99).unwrap();
        }
        assert_eq!(cart.total(), Money::from_cents(100_000_000 * 99 * 10));
    }

    #[test]
    fn test_line_item_serializes_snapshot() {
        let mut cart = CartLedger::new();
        let id = cart.add_item(&open_session()).unwrap().id();
        cart.set_quantity(id, 4).unwrap();

        let json = serde_json::to_value(cart.get(id).unwrap()).unwrap();
        assert_eq!(json["quantity"], 4);
        assert_eq!(json["unit_price"], 1999);
        assert_eq!(json["id"], id.to_string());
    }

    #[test]
    fn test_item_keeps_confirmed_design() {
        let mut cart = CartLedger::new();
        let mut session = open_session();
        let file = FileMeta {
            filename: "crest.png".to_string(),
            mime_type: "image/png".to_string(),
            size: 100,
        };
        let upload = crate::domain::UploadedDesign {
            id: "88".to_string(),
            url: Some("uploads/88.png".to_string()),
        };
        session.attach_design(&file, Some(upload)).unwrap();

        let item = cart.add_item(&session).unwrap();
        assert_eq!(item.design_id.as_deref(), Some("88"));
        assert_eq!(item.design_preview.as_deref(), Some("uploads/88.png"));
    }
}
