// src/handlers/data.rs

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::common::error::AppError;
use crate::config::AppState;
use crate::store::{coleccion, JsonStore};

async fn lista(store: &JsonStore, coleccion: &str) -> Result<Value, AppError> {
    store.load(coleccion, Value::Array(Vec::new())).await
}

/// Vuelca todas las colecciones en una sola respuesta. Es la carga
/// inicial del frontend.
pub async fn get_all_data(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let store = &app_state.store;

    let datos = json!({
        "users": lista(store, coleccion::USERS).await?,
        "ingresos": lista(store, coleccion::INGRESOS).await?,
        "gastos": store.load(coleccion::GASTOS, json!({})).await?,
        "precios": lista(store, coleccion::PRECIOS).await?,
        "costos": store
            .load(
                coleccion::COSTOS,
                json!({ "ingredientes": [], "hamburguesas": [] }),
            )
            .await?,
        "stock": lista(store, coleccion::STOCK).await?,
        "pedidos": lista(store, coleccion::PEDIDOS).await?,
        "clientes": lista(store, coleccion::CLIENTES).await?,
        "vencimientos": lista(store, coleccion::VENCIMIENTOS).await?,
        "proveedores": lista(store, coleccion::PROVEEDORES).await?,
    });
    Ok(Json(datos))
}
