// src/models/cliente.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Resumen derivado por dirección normalizada. No es autoritativo: se puede
// recomputar entero a partir de la colección de pedidos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cliente {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub numero: u64,

    #[serde(default)]
    pub direccion: String,

    #[serde(default)]
    pub cantidad_pedidos: u64,

    #[serde(default)]
    pub ultimo_pedido_fecha: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
