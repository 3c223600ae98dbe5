//! Broadcaster de snapshots de tracking
//!
//! Un timer fijo lee la flota completa del store una vez por tick, la
//! proyecta a `TrackingSnapshot` y publica el frame en el canal de viewers.
//! El canal es un `tokio::sync::broadcast`: cada conexión SSE o WebSocket
//! se suscribe al conectar y se da de baja soltando su receiver. Un viewer
//! lento se salta los frames que perdió y sigue con el más reciente; un
//! viewer muerto jamás retrasa el tick de los demás.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::models::vehicle::{TrackingFrame, VehicleQuery};
use crate::repositories::VehicleStore;

/// Nombre del evento que se emite por el canal socket
pub const TRACKING_EVENT: &str = "vehicle:coords";

/// Frames en vuelo por viewer. No hay buffering por conexión: si un viewer
/// no consume a tiempo, pierde ticks intermedios y recibe el siguiente.
const CHANNEL_CAPACITY: usize = 16;

/// Registro de viewers conectados y fan-out hacia ellos
#[derive(Clone)]
pub struct TrackingChannel {
    tx: broadcast::Sender<TrackingFrame>,
}

impl TrackingChannel {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Alta de un viewer. Recibe frames desde el próximo tick en adelante,
    /// sin replay de histórico.
    pub fn subscribe(&self) -> broadcast::Receiver<TrackingFrame> {
        self.tx.subscribe()
    }

    /// Publicar un frame a todos los viewers conectados. Sin suscriptores
    /// el envío se descarta.
    pub fn publish(&self, frame: TrackingFrame) {
        let _ = self.tx.send(frame);
    }

    pub fn viewer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for TrackingChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle del broadcaster en marcha. Quien arranca el subsistema es dueño
/// de pararlo; no quedan timers huérfanos tras el shutdown.
pub struct BroadcasterHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl BroadcasterHandle {
    /// Cancelar el timer y esperar a que el task termine
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

/// Arrancar el loop de broadcast con la cadencia indicada.
pub fn start_broadcaster(
    store: Arc<dyn VehicleStore>,
    channel: TrackingChannel,
    interval: Duration,
) -> BroadcasterHandle {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        info!("📡 Broadcaster de tracking arrancado (cadencia {:?})", interval);
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Una sola lectura consistente de todo el conjunto
                    match store.list(&VehicleQuery::default()).await {
                        Ok(vehicles) => {
                            channel.publish(TrackingFrame::capture(&vehicles));
                        }
                        Err(e) => {
                            // Feed best-effort: el tick se descarta y el
                            // siguiente reintenta
                            debug!("Tick de broadcast omitido: {}", e);
                        }
                    }
                }
                _ = shutdown_rx.changed() => {
                    debug!("Broadcaster de tracking detenido");
                    break;
                }
            }
        }
    });

    BroadcasterHandle {
        shutdown: shutdown_tx,
        task,
    }
}
