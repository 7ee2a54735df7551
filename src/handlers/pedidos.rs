// src/handlers/pedidos.rs

use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::common::error::AppError;
use crate::config::AppState;
use crate::models::pedido::{CambiosPedido, Pedido};

pub async fn add_pedido(
    State(app_state): State<AppState>,
    Json(pedido): Json<Pedido>,
) -> Result<impl IntoResponse, AppError> {
    let creado = app_state.pedido_service.crear(pedido).await?;
    Ok((StatusCode::CREATED, Json(creado)))
}

pub async fn update_pedido(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(cambios): Json<CambiosPedido>,
) -> Result<impl IntoResponse, AppError> {
    let actualizado = app_state.pedido_service.actualizar(&id, cambios).await?;
    Ok(Json(actualizado))
}

pub async fn delete_pedido(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.pedido_service.eliminar(&id).await?;
    Ok(Json(json!({ "message": "Pedido eliminado exitosamente" })))
}
