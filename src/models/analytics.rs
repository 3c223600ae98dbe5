//! Modelos de Analytics
//!
//! Agregados simples sobre el mismo conjunto de vehículos que alimenta el
//! resto de la API.

use serde::Serialize;

use crate::models::vehicle::VehicleStatus;

/// Resumen de la flota para el dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total_vehicles: usize,
    pub active_vehicles: usize,
    pub inactive_vehicles: usize,
    pub maintenance_vehicles: usize,
    pub avg_speed: f64,
    pub avg_fuel: f64,
}

/// Conteo por estado
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub status: VehicleStatus,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetAnalytics {
    pub summary: FleetSummary,
    pub vehicle_status: Vec<StatusBreakdown>,
}
