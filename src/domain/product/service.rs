use std::sync::Arc;
use anyhow::Result;
use rust_decimal::Decimal;

use crate::domain::events::{ShopEvent, ShopEventDispatcher};
use crate::event_dispatch::EventEnvelope;
use crate::repository::Repository;

use super::entity::Product;
use super::events::{ProductCreated, ProductEvent};

// ============================================================================
// Product Service
// ============================================================================

pub struct ProductService {
    repository: Arc<dyn Repository<Product>>,
    dispatcher: Arc<ShopEventDispatcher>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn Repository<Product>>, dispatcher: Arc<ShopEventDispatcher>) -> Self {
        Self { repository, dispatcher }
    }

    /// Create and persist a product, then publish `ProductCreatedEvent`
    pub async fn create(&self, id: &str, name: &str, price: Decimal) -> Result<Product> {
        let product = Product::new(id, name, price)?;
        self.repository.create(&product).await?;

        let event: ShopEvent = ProductEvent::Created(ProductCreated::from(&product)).into();
        let envelope = EventEnvelope::new(event);
        let summary = self.dispatcher.notify(&envelope)?;

        tracing::debug!(
            product_id = %product.id(),
            handlers = summary.invoked,
            "Published product event"
        );

        Ok(product)
    }
}
