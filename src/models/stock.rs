// src/models/stock.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::util::opt_f64_laxo;

// El catálogo de stock es un bosque: los `titulo` son categorías y los
// `producto` son las hojas con cantidad real en despensa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoStock {
    Titulo,
    Producto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockItem {
    #[serde(default)]
    pub id: String,

    // Clave de join case-insensitive hacia recetas e ítems vendidos.
    #[serde(default)]
    pub descripcion: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<TipoStock>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padre_id: Option<String>,

    // Solo significativa cuando tipo = producto. Los archivos viejos a
    // veces la guardan como string, por eso la coerción laxa.
    #[serde(
        default,
        deserialize_with = "opt_f64_laxo",
        skip_serializing_if = "Option::is_none"
    )]
    pub cantidad: Option<f64>,

    // Campos que el frontend agrega y nosotros no interpretamos.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
