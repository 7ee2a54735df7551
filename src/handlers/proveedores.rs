// src/handlers/proveedores.rs

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::common::error::AppError;
use crate::config::AppState;
use crate::store::coleccion;

pub async fn get_proveedores(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let proveedores: Value = app_state
        .store
        .load(coleccion::PROVEEDORES, Value::Array(Vec::new()))
        .await?;
    Ok(Json(proveedores))
}

/// El frontend manda la lista completa; acá se reemplaza tal cual.
pub async fn save_proveedores(
    State(app_state): State<AppState>,
    Json(proveedores): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let _guard = app_state.store.bloqueo_escritura().await;
    app_state
        .store
        .store(coleccion::PROVEEDORES, &proveedores)
        .await?;
    Ok(Json(json!({
        "message": "Datos de proveedores guardados exitosamente."
    })))
}
