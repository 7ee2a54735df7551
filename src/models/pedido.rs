// src/models/pedido.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::util::doble_opcion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstadoPedido {
    Entregado,
    Pendiente,
}

fn estado_default() -> EstadoPedido {
    EstadoPedido::Pendiente
}

fn cantidad_default() -> Value {
    Value::from(1)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPedido {
    #[serde(default)]
    pub descripcion: String,

    // Crudo a propósito: el frontend manda números o strings, y la
    // coerción (con salteo del ítem si falla) es del reconciliador.
    // Ausente cuenta como 1; un null explícito queda null y el
    // reconciliador saltea esa línea.
    #[serde(default = "cantidad_default")]
    pub cantidad: Value,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pedido {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub items: Vec<ItemPedido>,

    // Al crear se fuerza siempre a `entregado` (comportamiento heredado:
    // no existe el pedido pendiente recién creado).
    #[serde(default = "estado_default")]
    pub estado: EstadoPedido,

    #[serde(default)]
    pub direccion: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<String>,

    // `null` es un valor válido en el wire (pedido vuelto a pendiente),
    // así que no se saltea al serializar.
    #[serde(default)]
    pub fecha_entrega: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cambios parciales sobre un pedido existente. Los campos ausentes no se
/// tocan; `fecha_entrega` distingue "ausente" de "null explícito".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CambiosPedido {
    pub items: Option<Vec<ItemPedido>>,
    pub estado: Option<EstadoPedido>,
    pub direccion: Option<String>,

    #[serde(default)]
    pub fecha_creacion: Option<String>,

    #[serde(default, deserialize_with = "doble_opcion")]
    pub fecha_entrega: Option<Option<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
