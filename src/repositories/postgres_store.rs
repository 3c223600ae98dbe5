//! Store de vehículos sobre PostgreSQL
//!
//! Backend persistente, activo cuando hay DATABASE_URL configurada. El
//! schema se inicializa solo en el primer arranque. El merge parcial se
//! resuelve con COALESCE en un único UPDATE, que es lo que da la atomicidad
//! por registro bajo escritores concurrentes.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::models::vehicle::{NewVehicle, Vehicle, VehicleChanges, VehicleQuery};
use crate::repositories::vehicle_store::VehicleStore;
use crate::utils::errors::AppResult;

const INIT_SCHEMA: &str = r#"
DO $$ BEGIN
    CREATE TYPE vehicle_status AS ENUM ('active', 'inactive', 'maintenance');
EXCEPTION
    WHEN duplicate_object THEN NULL;
END $$;

CREATE TABLE IF NOT EXISTS vehicles (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL DEFAULT '',
    driver TEXT NOT NULL DEFAULT '',
    status vehicle_status NOT NULL DEFAULT 'inactive',
    location TEXT NOT NULL DEFAULT '',
    lat DOUBLE PRECISION NOT NULL DEFAULT 0,
    lng DOUBLE PRECISION NOT NULL DEFAULT 0,
    speed DOUBLE PRECISION NOT NULL DEFAULT 0,
    fuel DOUBLE PRECISION NOT NULL DEFAULT 0,
    last_update TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    route TEXT NOT NULL DEFAULT '',
    vehicle_type TEXT NOT NULL DEFAULT '',
    license_plate TEXT NOT NULL DEFAULT '',
    year INTEGER NOT NULL DEFAULT 0,
    make TEXT NOT NULL DEFAULT '',
    model TEXT NOT NULL DEFAULT '',
    mileage BIGINT NOT NULL DEFAULT 0,
    next_maintenance TEXT NOT NULL DEFAULT '',
    notes TEXT NOT NULL DEFAULT '',
    heading DOUBLE PRECISION NOT NULL DEFAULT 0
);
"#;

pub struct PgVehicleStore {
    pool: PgPool,
}

impl PgVehicleStore {
    /// Conectar e inicializar el schema si hace falta
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::raw_sql(INIT_SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for PgVehicleStore {
    async fn list(&self, query: &VehicleQuery) -> AppResult<Vec<Vehicle>> {
        let mut sql = String::from("SELECT * FROM vehicles");
        let mut clauses: Vec<String> = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(status) = query.status_filter() {
            binds.push(status.to_string());
            clauses.push(format!("status::text = ${}", binds.len()));
        }
        if let Some(term) = query.search.as_deref() {
            binds.push(format!("%{}%", term));
            let n = binds.len();
            clauses.push(format!(
                "(name ILIKE ${n} OR driver ILIKE ${n} OR license_plate ILIKE ${n} \
                 OR make ILIKE ${n} OR model ILIKE ${n})"
            ));
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id ASC");

        let mut q = sqlx::query_as::<_, Vehicle>(&sql);
        for bind in binds {
            q = q.bind(bind);
        }
        let vehicles = q.fetch_all(&self.pool).await?;
        Ok(vehicles)
    }

    async fn get(&self, id: &str) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vehicle)
    }

    async fn create(&self, data: NewVehicle) -> AppResult<Vehicle> {
        let id = match &data.id {
            Some(id) => id.clone(),
            None => {
                let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
                    .fetch_one(&self.pool)
                    .await?;
                format!("VH{:03}", count + 1)
            }
        };
        let vehicle = Vehicle::from_new(data, id, Utc::now());

        let created = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, name, driver, status, location, lat, lng, speed, fuel,
                last_update, route, vehicle_type, license_plate, year, make,
                model, mileage, next_maintenance, notes, heading
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20
            )
            RETURNING *
            "#,
        )
        .bind(&vehicle.id)
        .bind(&vehicle.name)
        .bind(&vehicle.driver)
        .bind(vehicle.status)
        .bind(&vehicle.location)
        .bind(vehicle.lat)
        .bind(vehicle.lng)
        .bind(vehicle.speed)
        .bind(vehicle.fuel)
        .bind(vehicle.last_update)
        .bind(&vehicle.route)
        .bind(&vehicle.vehicle_type)
        .bind(&vehicle.license_plate)
        .bind(vehicle.year)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.mileage)
        .bind(&vehicle.next_maintenance)
        .bind(&vehicle.notes)
        .bind(vehicle.heading)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn merge(&self, id: &str, changes: VehicleChanges) -> AppResult<Option<Vehicle>> {
        let updated = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles SET
                name = COALESCE($2, name),
                driver = COALESCE($3, driver),
                status = COALESCE($4, status),
                location = COALESCE($5, location),
                lat = COALESCE($6, lat),
                lng = COALESCE($7, lng),
                speed = COALESCE($8, speed),
                fuel = COALESCE($9, fuel),
                route = COALESCE($10, route),
                vehicle_type = COALESCE($11, vehicle_type),
                license_plate = COALESCE($12, license_plate),
                year = COALESCE($13, year),
                make = COALESCE($14, make),
                model = COALESCE($15, model),
                mileage = COALESCE($16, mileage),
                next_maintenance = COALESCE($17, next_maintenance),
                notes = COALESCE($18, notes),
                heading = COALESCE($19, heading),
                last_update = $20
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.driver)
        .bind(changes.status)
        .bind(changes.location)
        .bind(changes.lat)
        .bind(changes.lng)
        .bind(changes.speed)
        .bind(changes.fuel)
        .bind(changes.route)
        .bind(changes.vehicle_type)
        .bind(changes.license_plate)
        .bind(changes.year)
        .bind(changes.make)
        .bind(changes.model)
        .bind(changes.mileage)
        .bind(changes.next_maintenance)
        .bind(changes.notes)
        .bind(changes.heading)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
