// src/models/costos.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::util::opt_f64_laxo;

// La colección de costos trae dos listas: ingredientes base (con su tasa
// de consumo) y recetas de hamburguesas. Los joins entre ambas y el stock
// son siempre por nombre plegado a minúsculas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Costos {
    #[serde(default)]
    pub ingredientes: Vec<IngredienteBase>,

    #[serde(default)]
    pub hamburguesas: Vec<Receta>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredienteBase {
    #[serde(default)]
    pub nombre: String,

    // Consumo por hamburguesa vendida. Ausente o no numérico cuenta como 0.
    #[serde(
        rename = "usoPorHamburguesa",
        default,
        deserialize_with = "opt_f64_laxo",
        skip_serializing_if = "Option::is_none"
    )]
    pub uso_por_hamburguesa: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receta {
    // Coincide con la descripción del ítem vendible (case-insensitive).
    #[serde(default)]
    pub nombre: String,

    #[serde(default)]
    pub ingredientes: Vec<IngredienteReceta>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Referencia a un ingrediente base por su alias dentro de la receta. Ese
// alias se resuelve primero contra los ingredientes base, y el nombre
// canónico del ingrediente base es el que se busca en el stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredienteReceta {
    #[serde(default)]
    pub nombre: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
