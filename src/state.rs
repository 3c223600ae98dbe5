//! Shared application state
//!
//! El estado que se clona dentro del router de Axum: el store de vehículos
//! detrás de su trait, la configuración y el canal de tracking al que se
//! suscriben los viewers.

use std::sync::Arc;

use crate::config::EnvironmentConfig;
use crate::repositories::VehicleStore;
use crate::services::TrackingChannel;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VehicleStore>,
    pub config: Arc<EnvironmentConfig>,
    pub tracking: TrackingChannel,
}

impl AppState {
    pub fn new(
        store: Arc<dyn VehicleStore>,
        config: EnvironmentConfig,
        tracking: TrackingChannel,
    ) -> Self {
        Self {
            store,
            config: Arc::new(config),
            tracking,
        }
    }
}
