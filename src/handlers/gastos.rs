// src/handlers/gastos.rs

use axum::{extract::{Path, State}, response::IntoResponse, Json};
use serde_json::json;

use crate::common::error::AppError;
use crate::config::AppState;
use crate::models::gastos::Gasto;

pub async fn get_gastos_mes(
    State(app_state): State<AppState>,
    Path((mes, anio)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let gastos = app_state.gastos_service.listar_mes(&anio, &mes).await?;
    Ok(Json(gastos))
}

pub async fn update_gastos_mes(
    State(app_state): State<AppState>,
    Path((mes, anio)): Path<(String, String)>,
    Json(lista): Json<Vec<Gasto>>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .gastos_service
        .actualizar_mes(&anio, &mes, lista)
        .await?;
    Ok(Json(json!({
        "message": format!("Gastos para {mes} {anio} actualizados")
    })))
}
