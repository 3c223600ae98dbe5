//! Utilidades del sistema
//!
//! Manejo de errores y tipos compartidos entre capas.

pub mod errors;
