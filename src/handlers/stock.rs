// src/handlers/stock.rs

use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::error::AppError;
use crate::common::util::{como_f64, valor_presente};
use crate::config::AppState;
use crate::handlers::crud::{self, Registro};
use crate::models::stock::TipoStock;
use crate::store::coleccion;

// ---
// Payload: CrearStockPayload
// ---
#[derive(Debug, Deserialize, Validate)]
pub struct CrearStockPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "Descripción y tipo son obligatorios."))]
    pub descripcion: String,

    #[validate(required(message = "Descripción y tipo son obligatorios."))]
    pub tipo: Option<TipoStock>,

    pub padre_id: Option<String>,

    // Crudo: la coerción a número depende del tipo, y un null mandado a
    // propósito no es lo mismo que el campo ausente.
    #[serde(default, deserialize_with = "valor_presente")]
    pub cantidad: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CrearStockPayload {
    // Regla: un producto siempre cuelga de un título padre.
    fn validar_consistencia(&self) -> Result<(), ValidationError> {
        if self.tipo == Some(TipoStock::Producto) && self.padre_id.is_none() {
            let mut err = ValidationError::new("PadreRequeridoParaProducto");
            err.message = Some("Un producto debe tener un título padre.".into());
            return Err(err);
        }
        Ok(())
    }
}

// Para un producto la cantidad tiene que ser numérica. El campo ausente
// vale 0; un null explícito o un valor no coercible es rechazo.
fn coercionar_cantidad(valor: Option<&Value>) -> Result<f64, AppError> {
    match valor {
        None => Ok(0.0),
        Some(v) => como_f64(v)
            .ok_or_else(|| AppError::DatoInvalido("La cantidad debe ser un número.".into())),
    }
}

pub async fn get_stock(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let stock = crud::listar(&app_state.store, coleccion::STOCK).await?;
    Ok(Json(stock))
}

// ---
// Handler: add_stock_item
// ---
pub async fn add_stock_item(
    State(app_state): State<AppState>,
    Json(payload): Json<CrearStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validar_consistencia().map_err(|e| {
        let mut errors = validator::ValidationErrors::new();
        errors.add("padre_id", e);
        AppError::Validacion(errors)
    })?;

    let mut registro = Registro::new();
    registro.insert("id".into(), json!(Uuid::new_v4().to_string()));
    registro.insert("descripcion".into(), json!(payload.descripcion));
    registro.insert("tipo".into(), json!(payload.tipo));
    if let Some(padre_id) = payload.padre_id {
        registro.insert("padre_id".into(), json!(padre_id));
    }
    if payload.tipo == Some(TipoStock::Producto) {
        let cantidad = coercionar_cantidad(payload.cantidad.as_ref())?;
        registro.insert("cantidad".into(), json!(cantidad));
    } else if let Some(cantidad) = payload.cantidad {
        // Los títulos no llevan cantidad propia; lo que venga pasa crudo.
        registro.insert("cantidad".into(), cantidad);
    }
    for (k, v) in payload.extra {
        registro.insert(k, v);
    }

    let creado = crud::agregar(&app_state.store, coleccion::STOCK, registro).await?;
    Ok((StatusCode::CREATED, Json(creado)))
}

// ---
// Handler: update_stock_item
// ---
pub async fn update_stock_item(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(mut cambios): Json<Registro>,
) -> Result<impl IntoResponse, AppError> {
    // Misma regla de cantidad numérica cuando el cambio lo vuelve producto.
    if cambios.get("tipo").and_then(Value::as_str) == Some("producto") {
        let coercida = coercionar_cantidad(cambios.get("cantidad"))?;
        cambios.insert("cantidad".into(), json!(coercida));
    }

    let actualizado = crud::actualizar(
        &app_state.store,
        coleccion::STOCK,
        &id,
        cambios,
        "Ítem de stock",
    )
    .await?;
    Ok(Json(actualizado))
}

pub async fn delete_stock_item(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    crud::eliminar_cascada(&app_state.store, coleccion::STOCK, &id, "Ítem de stock").await?;
    Ok(Json(json!({
        "message": "Ítem(s) de stock eliminado(s) exitosamente"
    })))
}
