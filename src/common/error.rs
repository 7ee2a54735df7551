use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nuestro tipo de error, con `thiserror` para mejor ergonomía.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de validación")]
    Validacion(#[from] validator::ValidationErrors),

    // El recurso referenciado no existe en su colección.
    // El literal es el sujeto del mensaje ("Pedido", "Ítem de stock", etc.).
    #[error("{0} no encontrado")]
    NoEncontrado(&'static str),

    // Payload malformado: cantidad no numérica, mes desconocido, etc.
    #[error("{0}")]
    DatoInvalido(String),

    #[error("Credenciales inválidas")]
    CredencialesInvalidas,

    #[error("El nombre de usuario ya existe.")]
    UsuarioYaExiste,

    #[error("Error de E/S")]
    Io(#[from] std::io::Error),

    // Variante genérica para cualquier otro error inesperado.
    // `anyhow::Error` es buenísimo para capturar el contexto del error.
    #[error("Error interno del servidor")]
    Interno(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Devolvemos todos los detalles de la validación.
            AppError::Validacion(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Uno o más campos son inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::NoEncontrado(que) => {
                let body = Json(json!({ "error": format!("{que} no encontrado") }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }
            AppError::DatoInvalido(msg) => {
                let body = Json(json!({ "error": msg }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::CredencialesInvalidas => (StatusCode::UNAUTHORIZED, "Credenciales inválidas"),
            AppError::UsuarioYaExiste => (StatusCode::CONFLICT, "El nombre de usuario ya existe."),

            // Todo lo demás (Io, Interno) se vuelve 500.
            // `tracing` va a loggear el mensaje detallado que `thiserror` nos dio.
            ref e => {
                tracing::error!("Error Interno del Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocurrió un error inesperado.")
            }
        };

        // Respuesta estándar para errores simples que solo tienen un mensaje.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
