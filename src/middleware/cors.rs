//! Middleware de CORS
//!
//! El dashboard y los trackers se sirven desde otros orígenes, y el stream
//! SSE necesita responder con cabeceras CORS abiertas.

use tower_http::cors::CorsLayer;

/// CORS permisivo. NOTA: cualquier origen puede consumir la API; si el
/// despliegue lo necesita, restringir con `cors_with_origins`.
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Variante con orígenes concretos
pub fn cors_with_origins(origins: Vec<String>) -> CorsLayer {
    use axum::http::{HeaderValue, Method};

    let mut cors = CorsLayer::new().allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ]);
    for origin in origins {
        if let Ok(value) = HeaderValue::from_str(&origin) {
            cors = cors.allow_origin(value);
        }
    }
    cors
}
