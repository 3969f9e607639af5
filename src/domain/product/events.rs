use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::event_dispatch::DomainEvent;
use super::entity::Product;

// ============================================================================
// Product Domain Events
// ============================================================================

pub const PRODUCT_CREATED: &str = "ProductCreatedEvent";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ProductEvent {
    Created(ProductCreated),
}

impl DomainEvent for ProductEvent {
    fn event_name(&self) -> &'static str {
        match self {
            ProductEvent::Created(_) => PRODUCT_CREATED,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreated {
    pub id: String,
    pub name: String,
    pub price: Decimal,
}

impl From<&Product> for ProductCreated {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.name().to_string(),
            price: product.price(),
        }
    }
}
