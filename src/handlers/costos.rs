// src/handlers/costos.rs

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::common::error::AppError;
use crate::config::AppState;
use crate::store::coleccion;

pub async fn get_costos(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let costos: Value = app_state
        .store
        .load(
            coleccion::COSTOS,
            json!({ "ingredientes": [], "hamburguesas": [] }),
        )
        .await?;
    Ok(Json(costos))
}

/// Reemplaza el documento de costos completo. El payload pasa crudo al
/// archivo, solo se valida que tenga las dos listas.
pub async fn update_costos(
    State(app_state): State<AppState>,
    Json(costos): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let tiene_claves = costos
        .as_object()
        .is_some_and(|o| o.contains_key("ingredientes") && o.contains_key("hamburguesas"));
    if !tiene_claves {
        return Err(AppError::DatoInvalido(
            "El formato de datos de costos es inválido.".into(),
        ));
    }

    let _guard = app_state.store.bloqueo_escritura().await;
    app_state.store.store(coleccion::COSTOS, &costos).await?;

    Ok(Json(json!({
        "message": "Datos de costos actualizados exitosamente."
    })))
}
