// src/handlers/rappi_banco.rs

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::common::error::AppError;
use crate::config::AppState;
use crate::store::coleccion;

fn saldos_default() -> Value {
    json!({ "rappi": 0, "banco": 0 })
}

pub async fn get_rappi_banco(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let saldos: Value = app_state
        .store
        .load(coleccion::RAPPI_BANCO, saldos_default())
        .await?;
    Ok(Json(saldos))
}

/// Reemplaza el documento entero. Se exige que vengan las dos claves.
pub async fn update_rappi_banco(
    State(app_state): State<AppState>,
    Json(saldos): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let valido = saldos
        .as_object()
        .is_some_and(|o| o.contains_key("rappi") && o.contains_key("banco"));
    if !valido {
        return Err(AppError::DatoInvalido(
            "Formato inválido. Se espera {'rappi': x, 'banco': y}".into(),
        ));
    }

    let _guard = app_state.store.bloqueo_escritura().await;
    app_state.store.store(coleccion::RAPPI_BANCO, &saldos).await?;
    Ok(Json(json!({ "message": "Datos actualizados exitosamente" })))
}
