// ============================================================================
// Domain Events - DDD shop domain with an in-process event dispatcher
// ============================================================================
//
// - event_dispatch/ - generic publish/subscribe (events, handlers, dispatcher)
// - domain/         - Customer, Product and Order with their events/handlers
// - repository/     - storage contract and in-memory implementation
// - metrics/        - Prometheus metrics for dispatch
//
// ============================================================================

pub mod domain;
pub mod event_dispatch;
pub mod metrics;
pub mod repository;
