//! Capa de acceso a datos
//!
//! El trait `VehicleStore` define el contrato; memoria y PostgreSQL lo
//! implementan de forma intercambiable.

pub mod memory_store;
pub mod postgres_store;
pub mod vehicle_store;

pub use memory_store::MemoryVehicleStore;
pub use postgres_store::PgVehicleStore;
pub use vehicle_store::VehicleStore;
