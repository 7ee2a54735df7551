// src/handlers/precios.rs

use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::common::error::AppError;
use crate::config::AppState;
use crate::handlers::crud::{self, Registro};
use crate::store::coleccion;

pub async fn get_precios(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let precios = crud::listar(&app_state.store, coleccion::PRECIOS).await?;
    Ok(Json(precios))
}

pub async fn add_precio_item(
    State(app_state): State<AppState>,
    Json(item): Json<Registro>,
) -> Result<impl IntoResponse, AppError> {
    let creado = crud::agregar(&app_state.store, coleccion::PRECIOS, item).await?;
    Ok((StatusCode::CREATED, Json(creado)))
}

pub async fn update_precio_item(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(cambios): Json<Registro>,
) -> Result<impl IntoResponse, AppError> {
    let actualizado = crud::actualizar(
        &app_state.store,
        coleccion::PRECIOS,
        &id,
        cambios,
        "Ítem de precio",
    )
    .await?;
    Ok(Json(actualizado))
}

/// Reemplazo de la lista de precios completa.
pub async fn update_all_precios(
    State(app_state): State<AppState>,
    Json(lista): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let _guard = app_state.store.bloqueo_escritura().await;
    app_state.store.store(coleccion::PRECIOS, &lista).await?;
    Ok(Json(json!({
        "message": "Lista de precios actualizada exitosamente."
    })))
}

pub async fn delete_precio_item(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::eliminar_cascada(&app_state.store, coleccion::PRECIOS, &id, "Ítem de precio").await?;
    Ok(Json(json!({
        "message": "Ítem(s) de precio eliminado(s) exitosamente"
    })))
}
