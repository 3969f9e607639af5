use serde::{Deserialize, Serialize};

use crate::event_dispatch::DomainEvent;
use super::entity::Customer;
use super::value_objects::Address;

// ============================================================================
// Customer Domain Events
// ============================================================================

pub const CUSTOMER_CREATED: &str = "CustomerCreatedEvent";
pub const CUSTOMER_ADDRESS_CHANGED: &str = "CustomerChangeAddressEvent";

/// Union type for all customer events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CustomerEvent {
    Created(CustomerCreated),
    AddressChanged(CustomerAddressChanged),
}

impl DomainEvent for CustomerEvent {
    fn event_name(&self) -> &'static str {
        match self {
            CustomerEvent::Created(_) => CUSTOMER_CREATED,
            CustomerEvent::AddressChanged(_) => CUSTOMER_ADDRESS_CHANGED,
        }
    }
}

// Individual event types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreated {
    pub id: String,
    pub name: String,
    pub address: Option<Address>,
}

impl From<&Customer> for CustomerCreated {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id().to_string(),
            name: customer.name().to_string(),
            address: customer.address().cloned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerAddressChanged {
    pub id: String,
    pub name: String,
    pub address: Address,
}

impl CustomerAddressChanged {
    /// `None` when the customer has no address yet
    pub fn from_customer(customer: &Customer) -> Option<Self> {
        customer.address().map(|address| Self {
            id: customer.id().to_string(),
            name: customer.name().to_string(),
            address: address.clone(),
        })
    }
}
