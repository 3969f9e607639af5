use serde::{Deserialize, Serialize};

use crate::event_dispatch::{DomainEvent, EventDispatcher};
use super::customer::CustomerEvent;
use super::product::ProductEvent;

// ============================================================================
// Shop Events - every event the domain publishes
// ============================================================================
//
// One dispatcher carries customer and product events; the routing key is
// always the inner event's name.
//
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "aggregate", content = "event")]
pub enum ShopEvent {
    Customer(CustomerEvent),
    Product(ProductEvent),
}

impl DomainEvent for ShopEvent {
    fn event_name(&self) -> &'static str {
        match self {
            ShopEvent::Customer(event) => event.event_name(),
            ShopEvent::Product(event) => event.event_name(),
        }
    }
}

impl From<CustomerEvent> for ShopEvent {
    fn from(event: CustomerEvent) -> Self {
        ShopEvent::Customer(event)
    }
}

impl From<ProductEvent> for ShopEvent {
    fn from(event: ProductEvent) -> Self {
        ShopEvent::Product(event)
    }
}

pub type ShopEventDispatcher = EventDispatcher<ShopEvent>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::{Customer, CustomerCreated};
    use crate::domain::product::{Product, ProductCreated};
    use rust_decimal_macros::dec;

    #[test]
    fn test_shop_event_delegates_name() {
        let customer = Customer::new("1", "Customer 1").unwrap();
        let event: ShopEvent = CustomerEvent::Created(CustomerCreated::from(&customer)).into();
        assert_eq!(event.event_name(), "CustomerCreatedEvent");

        let product = Product::new("p1", "Product 1", dec!(10.0)).unwrap();
        let event: ShopEvent = ProductEvent::Created(ProductCreated::from(&product)).into();
        assert_eq!(event.event_name(), "ProductCreatedEvent");
    }
}
