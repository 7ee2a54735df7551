// src/handlers/clientes.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::common::error::AppError;
use crate::config::AppState;
use crate::handlers::crud;
use crate::store::coleccion;

/// Los clientes se derivan de los pedidos; por eso la colección es de
/// solo lectura desde la API.
pub async fn get_clientes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let clientes = crud::listar(&app_state.store, coleccion::CLIENTES).await?;
    Ok(Json(clientes))
}
