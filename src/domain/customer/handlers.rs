use anyhow::bail;

use crate::domain::events::ShopEvent;
use crate::event_dispatch::{EventEnvelope, EventHandler};
use super::events::{CustomerAddressChanged, CustomerEvent};

// ============================================================================
// Customer Event Handlers
// ============================================================================

/// Logs every newly created customer
#[derive(Debug, Default)]
pub struct LogWhenCustomerIsCreatedHandler;

impl EventHandler<ShopEvent> for LogWhenCustomerIsCreatedHandler {
    fn handle(&self, event: &EventEnvelope<ShopEvent>) -> anyhow::Result<()> {
        let ShopEvent::Customer(CustomerEvent::Created(created)) = &event.event_data else {
            bail!("expected CustomerCreatedEvent, got {}", event.event_type);
        };

        tracing::info!(
            event_id = %event.event_id,
            customer_id = %created.id,
            customer_name = %created.name,
            "Customer created"
        );
        Ok(())
    }
}

/// Logs the new address of a customer
#[derive(Debug, Default)]
pub struct LogWhenCustomerChangesAddressHandler;

impl EventHandler<ShopEvent> for LogWhenCustomerChangesAddressHandler {
    fn handle(&self, event: &EventEnvelope<ShopEvent>) -> anyhow::Result<()> {
        let ShopEvent::Customer(CustomerEvent::AddressChanged(changed)) = &event.event_data else {
            bail!("expected CustomerChangeAddressEvent, got {}", event.event_type);
        };

        tracing::info!(
            event_id = %event.event_id,
            customer_id = %changed.id,
            customer_name = %changed.name,
            street = changed.address.street(),
            number = changed.address.number(),
            zip = changed.address.zip(),
            city = changed.address.city(),
            "{}",
            describe_address_change(changed)
        );
        Ok(())
    }
}

fn describe_address_change(changed: &CustomerAddressChanged) -> String {
    let address = &changed.address;
    format!(
        "Customer address: {}, {} changed to: Street: {}, {}, zip code: {}, city: {}",
        changed.id,
        changed.name,
        address.street(),
        address.number(),
        address.zip(),
        address.city()
    )
}
