// src/handlers/vencimientos.rs
//
// El catálogo de vencimientos tiene la misma forma de bosque que el
// stock y los precios; comparte los accesores y la cascada de borrado.

use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::common::error::AppError;
use crate::config::AppState;
use crate::handlers::crud::{self, Registro};
use crate::store::coleccion;

pub async fn get_vencimientos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let items = crud::listar(&app_state.store, coleccion::VENCIMIENTOS).await?;
    Ok(Json(items))
}

pub async fn add_vencimiento_item(
    State(app_state): State<AppState>,
    Json(item): Json<Registro>,
) -> Result<impl IntoResponse, AppError> {
    let creado = crud::agregar(&app_state.store, coleccion::VENCIMIENTOS, item).await?;
    Ok((StatusCode::CREATED, Json(creado)))
}

pub async fn update_vencimiento_item(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(cambios): Json<Registro>,
) -> Result<impl IntoResponse, AppError> {
    let actualizado = crud::actualizar(
        &app_state.store,
        coleccion::VENCIMIENTOS,
        &id,
        cambios,
        "Ítem de vencimiento",
    )
    .await?;
    Ok(Json(actualizado))
}

pub async fn delete_vencimiento_item(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::eliminar_cascada(
        &app_state.store,
        coleccion::VENCIMIENTOS,
        &id,
        "Ítem de vencimiento",
    )
    .await?;
    Ok(Json(json!({
        "message": "Ítem(s) de vencimiento eliminado(s) exitosamente"
    })))
}
