//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de error de la aplicación y su conversión
//! a respuestas HTTP. Los fallos nunca atraviesan el borde de la API como
//! panics: se convierten al envelope `{success: false, error}` con el
//! status apropiado.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthorized(msg) => {
                warn!("Acceso no autorizado: {}", msg);
                (StatusCode::UNAUTHORIZED, msg)
            }

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),

            AppError::Validation(e) => {
                warn!("Request inválido: {}", e);
                (StatusCode::BAD_REQUEST, format!("Invalid request data: {}", e))
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),

            AppError::Database(e) => {
                error!("Error de base de datos: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }

            AppError::Internal(msg) => {
                error!("Error interno: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Helper para errores de recurso no encontrado
pub fn not_found_error(resource: &str) -> AppError {
    AppError::NotFound(format!("{} not found", resource))
}
