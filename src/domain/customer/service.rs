use std::sync::Arc;
use anyhow::{Context, Result};

use crate::domain::events::{ShopEvent, ShopEventDispatcher};
use crate::event_dispatch::EventEnvelope;
use crate::repository::Repository;

use super::entity::Customer;
use super::events::{CustomerAddressChanged, CustomerCreated, CustomerEvent};
use super::value_objects::Address;

// ============================================================================
// Customer Service
// ============================================================================
//
// Orchestrates: Entity change → Repository → Event Dispatcher
//
// ============================================================================

pub struct CustomerService {
    repository: Arc<dyn Repository<Customer>>,
    dispatcher: Arc<ShopEventDispatcher>,
}

impl CustomerService {
    pub fn new(repository: Arc<dyn Repository<Customer>>, dispatcher: Arc<ShopEventDispatcher>) -> Self {
        Self { repository, dispatcher }
    }

    /// Create and persist a customer, then publish `CustomerCreatedEvent`
    pub async fn create(&self, id: &str, name: &str) -> Result<Customer> {
        let customer = Customer::new(id, name)?;
        self.repository.create(&customer).await?;

        let event = CustomerEvent::Created(CustomerCreated::from(&customer));
        self.publish(event.into())?;

        Ok(customer)
    }

    /// Replace a customer's address, then publish `CustomerChangeAddressEvent`
    pub async fn change_address(&self, id: &str, address: Address) -> Result<Customer> {
        let mut customer = self.repository.find(id).await?;
        customer.change_address(address);
        self.repository.update(&customer).await?;

        let changed = CustomerAddressChanged::from_customer(&customer)
            .context("customer has no address after change")?;
        self.publish(CustomerEvent::AddressChanged(changed).into())?;

        Ok(customer)
    }

    fn publish(&self, event: ShopEvent) -> Result<()> {
        let envelope = EventEnvelope::new(event);
        let summary = self.dispatcher.notify(&envelope)?;

        tracing::debug!(
            event_type = %envelope.event_type,
            handlers = summary.invoked,
            "Published customer event"
        );
        Ok(())
    }
}
