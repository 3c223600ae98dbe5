use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use fleet_tracker::config::EnvironmentConfig;
use fleet_tracker::repositories::{MemoryVehicleStore, PgVehicleStore, VehicleStore};
use fleet_tracker::routes;
use fleet_tracker::services::{start_broadcaster, TrackingChannel};
use fleet_tracker::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚚 Fleet Tracker - Backend de tracking en tiempo real");
    info!("====================================================");

    let config = EnvironmentConfig::from_env();

    // Elegir backend del store
    let store: Arc<dyn VehicleStore> = match &config.database_url {
        Some(url) => {
            let store = match PgVehicleStore::connect(url).await {
                Ok(store) => store,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            info!("✅ Store PostgreSQL conectado");
            Arc::new(store)
        }
        None => {
            info!("💾 Sin DATABASE_URL: store en memoria con flota por defecto");
            Arc::new(MemoryVehicleStore::with_default_fleet())
        }
    };

    if config.track_token.is_none() {
        info!("🔓 TRACK_TOKEN sin configurar: ingest de ubicación en modo abierto");
    }

    // Arrancar el broadcaster de tracking
    let tracking = TrackingChannel::new();
    let broadcaster = start_broadcaster(
        store.clone(),
        tracking.clone(),
        config.broadcast_interval(),
    );

    let addr: SocketAddr = config.server_addr().parse()?;
    let state = AppState::new(store, config, tracking);
    let app = routes::create_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚗 Vehículos:");
    info!("   GET    /api/vehicles - Listar (filtros: status, search)");
    info!("   POST   /api/vehicles - Crear vehículo");
    info!("   GET    /api/vehicles/:id - Obtener vehículo");
    info!("   PUT    /api/vehicles/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("📍 Tracking:");
    info!("   PUT  /api/vehicles/:id/location - Ingest de ubicación (trackers)");
    info!("   GET  /api/vehicles/tracking - Proyección puntual de la flota");
    info!("   GET  /api/stream - Feed SSE por tick");
    info!("   GET  /api/socket - Feed WebSocket por tick");
    info!("📊 Analytics:");
    info!("   GET  /api/analytics - Resumen de flota");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Parar el timer de broadcast antes de salir
    broadcaster.shutdown().await;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
