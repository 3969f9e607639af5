use anyhow::bail;

use crate::domain::events::ShopEvent;
use crate::event_dispatch::{EventEnvelope, EventHandler};
use super::events::ProductEvent;

// ============================================================================
// Product Event Handlers
// ============================================================================

/// Announces new products. Delivery itself is out of scope, so the email
/// is only logged.
#[derive(Debug, Default)]
pub struct SendEmailWhenProductIsCreatedHandler;

impl EventHandler<ShopEvent> for SendEmailWhenProductIsCreatedHandler {
    fn handle(&self, event: &EventEnvelope<ShopEvent>) -> anyhow::Result<()> {
        let ShopEvent::Product(ProductEvent::Created(created)) = &event.event_data else {
            bail!("expected ProductCreatedEvent, got {}", event.event_type);
        };

        tracing::info!(
            event_id = %event.event_id,
            product_id = %created.id,
            product_name = %created.name,
            price = %created.price,
            "Sending email about new product"
        );
        Ok(())
    }
}
