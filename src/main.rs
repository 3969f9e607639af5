use std::sync::Arc;

use rust_decimal_macros::dec;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use domain_events::domain::customer::{
    Address, Customer, CustomerService, LogWhenCustomerChangesAddressHandler,
    LogWhenCustomerIsCreatedHandler, CUSTOMER_ADDRESS_CHANGED, CUSTOMER_CREATED,
};
use domain_events::domain::order::{Order, OrderItem};
use domain_events::domain::product::{
    Product, ProductService, SendEmailWhenProductIsCreatedHandler, PRODUCT_CREATED,
};
use domain_events::domain::ShopEventDispatcher;
use domain_events::event_dispatch::DispatcherConfig;
use domain_events::metrics::Metrics;
use domain_events::repository::{InMemoryRepository, Repository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging, overridable with RUST_LOG
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,domain_events=debug"))
        )
        .init();

    tracing::info!("Starting domain events demo");

    // === 1. Dispatcher with metrics ===
    let metrics = Arc::new(Metrics::new()?);
    let dispatcher = Arc::new(
        ShopEventDispatcher::with_config(DispatcherConfig::strict()).with_metrics(metrics.clone()),
    );

    // === 2. Register handlers ===
    let on_customer_created = Arc::new(LogWhenCustomerIsCreatedHandler);
    let on_address_changed = Arc::new(LogWhenCustomerChangesAddressHandler);
    let on_product_created = Arc::new(SendEmailWhenProductIsCreatedHandler);

    dispatcher.register(CUSTOMER_CREATED, on_customer_created.clone())?;
    dispatcher.register(CUSTOMER_ADDRESS_CHANGED, on_address_changed.clone())?;
    dispatcher.register(PRODUCT_CREATED, on_product_created.clone())?;

    // === 3. Services over in-memory repositories ===
    let customers = Arc::new(InMemoryRepository::<Customer>::new());
    let products = Arc::new(InMemoryRepository::<Product>::new());
    let orders = Arc::new(InMemoryRepository::<Order>::new());

    let customer_service = CustomerService::new(customers.clone(), dispatcher.clone());
    let product_service = ProductService::new(products.clone(), dispatcher.clone());

    // === 4. Customer lifecycle ===
    let customer = customer_service.create("c1", "Customer 1").await?;
    let customer = customer_service
        .change_address(customer.id(), Address::new("Rua João", 21, "01010-000", "Minas")?)
        .await?;

    let mut customer = customer;
    customer.activate()?;
    customers.update(&customer).await?;
    tracing::info!(customer_id = customer.id(), active = customer.is_active(), "Customer activated");

    // === 5. Products and an order ===
    let product = product_service.create("p1", "Product 1", dec!(10.00)).await?;
    let order = Order::new(
        "o1",
        customer.id(),
        vec![OrderItem::new("i1", product.name(), product.price(), product.id(), 3)?],
    )?;
    orders.create(&order).await?;
    tracing::info!(order_id = order.id(), total = %order.total(), "Order placed");

    // === 6. Unregister and show that nothing fires any more ===
    dispatcher.unregister(PRODUCT_CREATED, &on_product_created);
    product_service.create("p2", "Product 2", dec!(25.00)).await?;

    dispatcher.unregister_all();
    tracing::info!(
        event_types = dispatcher.event_handlers().len(),
        "All handlers unregistered"
    );

    tracing::debug!("Dispatch metrics:\n{}", metrics.render()?);
    tracing::info!("Demo complete");

    Ok(())
}
