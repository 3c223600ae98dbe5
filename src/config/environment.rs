//! Configuración de variables de entorno
//!
//! Todo lo que el core consume del entorno: dirección de escucha, secreto
//! opcional de los trackers, cadencia del broadcast y conexión del store.

use std::env;
use std::time::Duration;

/// Cadencia de broadcast por defecto, en segundos
pub const DEFAULT_BROADCAST_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub host: String,
    pub port: u16,
    /// Secreto compartido del ingest. Sin configurar, el ingest queda en
    /// modo abierto.
    pub track_token: Option<String>,
    pub broadcast_interval_secs: u64,
    /// Con DATABASE_URL el store es PostgreSQL; sin ella, memoria.
    pub database_url: Option<String>,
}

impl EnvironmentConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            track_token: env::var("TRACK_TOKEN").ok().filter(|t| !t.is_empty()),
            broadcast_interval_secs: env::var("BROADCAST_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_BROADCAST_INTERVAL_SECS),
            database_url: env::var("DATABASE_URL").ok(),
        }
    }

    pub fn broadcast_interval(&self) -> Duration {
        Duration::from_secs(self.broadcast_interval_secs)
    }

    /// Dirección de escucha del servidor
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
