//! Controllers
//!
//! Lógica de negocio entre las rutas y el store.

pub mod vehicle_controller;

pub use vehicle_controller::VehicleController;
