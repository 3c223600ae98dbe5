//! Services
//!
//! Este módulo contiene la lógica que no pertenece a un request concreto:
//! el broadcaster periódico de tracking y la agregación de analytics.

pub mod analytics_service;
pub mod broadcast_service;

pub use broadcast_service::{start_broadcaster, BroadcasterHandle, TrackingChannel};
