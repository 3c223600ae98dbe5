//! Agregación de analytics de flota
//!
//! Promedios y conteos sobre el mismo conjunto de registros que sirve el
//! CRUD. Una sola lectura del store por request, el resto es cálculo puro.

use crate::models::analytics::{FleetAnalytics, FleetSummary, StatusBreakdown};
use crate::models::vehicle::{Vehicle, VehicleStatus};

pub fn fleet_analytics(vehicles: &[Vehicle]) -> FleetAnalytics {
    let total = vehicles.len();
    let active = count_status(vehicles, VehicleStatus::Active);
    let inactive = count_status(vehicles, VehicleStatus::Inactive);
    let maintenance = count_status(vehicles, VehicleStatus::Maintenance);

    let (avg_speed, avg_fuel) = if total > 0 {
        let speed_sum: f64 = vehicles.iter().map(|v| v.speed).sum();
        let fuel_sum: f64 = vehicles.iter().map(|v| v.fuel).sum();
        (
            (speed_sum / total as f64).round(),
            (fuel_sum / total as f64).round(),
        )
    } else {
        (0.0, 0.0)
    };

    FleetAnalytics {
        summary: FleetSummary {
            total_vehicles: total,
            active_vehicles: active,
            inactive_vehicles: inactive,
            maintenance_vehicles: maintenance,
            avg_speed,
            avg_fuel,
        },
        vehicle_status: vec![
            StatusBreakdown {
                status: VehicleStatus::Active,
                count: active,
            },
            StatusBreakdown {
                status: VehicleStatus::Inactive,
                count: inactive,
            },
            StatusBreakdown {
                status: VehicleStatus::Maintenance,
                count: maintenance,
            },
        ],
    }
}

fn count_status(vehicles: &[Vehicle], status: VehicleStatus) -> usize {
    vehicles.iter().filter(|v| v.status == status).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::NewVehicle;
    use chrono::Utc;

    fn vehicle(id: &str, status: VehicleStatus, speed: f64, fuel: f64) -> Vehicle {
        Vehicle::from_new(
            NewVehicle {
                status: Some(status),
                speed: Some(speed),
                fuel: Some(fuel),
                ..Default::default()
            },
            id.to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn aggregates_counts_and_averages() {
        let fleet = vec![
            vehicle("VH001", VehicleStatus::Active, 45.0, 78.0),
            vehicle("VH002", VehicleStatus::Inactive, 0.0, 45.0),
            vehicle("VH003", VehicleStatus::Active, 32.0, 92.0),
            vehicle("VH004", VehicleStatus::Maintenance, 0.0, 67.0),
        ];

        let analytics = fleet_analytics(&fleet);
        assert_eq!(analytics.summary.total_vehicles, 4);
        assert_eq!(analytics.summary.active_vehicles, 2);
        assert_eq!(analytics.summary.inactive_vehicles, 1);
        assert_eq!(analytics.summary.maintenance_vehicles, 1);
        assert_eq!(analytics.summary.avg_speed, 19.0);
        assert_eq!(analytics.summary.avg_fuel, 71.0);
        assert_eq!(analytics.vehicle_status[0].count, 2);
    }

    #[test]
    fn empty_fleet_has_zero_averages() {
        let analytics = fleet_analytics(&[]);
        assert_eq!(analytics.summary.total_vehicles, 0);
        assert_eq!(analytics.summary.avg_speed, 0.0);
        assert_eq!(analytics.summary.avg_fuel, 0.0);
    }
}
