// src/handlers/ingresos.rs

use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::config::AppState;
use crate::handlers::crud::{self, Registro};
use crate::store::coleccion;

pub async fn get_movimientos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let movimientos = crud::listar(&app_state.store, coleccion::INGRESOS).await?;
    Ok(Json(movimientos))
}

pub async fn add_movimiento(
    State(app_state): State<AppState>,
    Json(mut movimiento): Json<Registro>,
) -> Result<impl IntoResponse, AppError> {
    // A los movimientos el id se les asigna siempre, traigan lo que traigan.
    movimiento.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
    let creado = crud::agregar(&app_state.store, coleccion::INGRESOS, movimiento).await?;
    Ok((StatusCode::CREATED, Json(creado)))
}

pub async fn delete_movimiento(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::eliminar(&app_state.store, coleccion::INGRESOS, &id, "Movimiento").await?;
    Ok(Json(json!({ "message": "Movimiento eliminado exitosamente" })))
}
