//! Autorización del ingest de trackers
//!
//! Chequeo de secreto compartido estático: si hay TRACK_TOKEN configurado,
//! el tracker debe presentarlo como credencial bearer. El esquema se
//! compara sin distinguir mayúsculas, el token con igualdad exacta. Sin
//! token configurado la API queda en modo abierto; es una simplificación
//! deliberada de despliegue, no una recomendación de seguridad.

use axum::http::{header, HeaderMap};

use crate::utils::errors::{AppError, AppResult};

pub fn require_track_token(headers: &HeaderMap, expected: Option<&str>) -> AppResult<()> {
    let Some(expected) = expected else {
        // Modo abierto
        return Ok(());
    };

    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    let scheme_ok = auth_header.len() >= 7 && auth_header[..7].eq_ignore_ascii_case("bearer ");
    if scheme_ok && auth_header[7..].trim() == expected {
        return Ok(());
    }

    Err(AppError::Unauthorized("Unauthorized".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn open_mode_accepts_everything() {
        assert!(require_track_token(&HeaderMap::new(), None).is_ok());
    }

    #[test]
    fn missing_header_is_rejected() {
        assert!(require_track_token(&HeaderMap::new(), Some("secreto")).is_err());
    }

    #[test]
    fn wrong_token_is_rejected() {
        let headers = headers_with("Bearer otro");
        assert!(require_track_token(&headers, Some("secreto")).is_err());
    }

    #[test]
    fn scheme_is_case_insensitive_token_is_exact() {
        let headers = headers_with("bEaReR secreto");
        assert!(require_track_token(&headers, Some("secreto")).is_ok());

        let headers = headers_with("Bearer SECRETO");
        assert!(require_track_token(&headers, Some("secreto")).is_err());
    }

    #[test]
    fn token_is_trimmed_not_prefixed() {
        let headers = headers_with("Bearer  secreto ");
        assert!(require_track_token(&headers, Some("secreto")).is_ok());

        let headers = headers_with("Bearersecreto");
        assert!(require_track_token(&headers, Some("secreto")).is_err());
    }
}
