// src/services/recetario.rs

use std::collections::HashMap;

use crate::common::util::clave;
use crate::models::costos::{Costos, IngredienteBase, Receta};
use crate::models::stock::StockItem;

/// Índice de búsqueda por nombre plegado sobre stock, recetas e
/// ingredientes base. Se construye de cero en cada corrida de
/// reconciliación: los datos de origen pueden haber cambiado desde la
/// llamada anterior, así que acá no hay caché.
///
/// El mapa de stock guarda índices dentro del vec (el reconciliador
/// necesita mutar las unidades); los otros dos prestan referencias.
pub struct IndiceRecetas<'a> {
    stock_por_nombre: HashMap<String, usize>,
    recetas: HashMap<String, &'a Receta>,
    ingredientes: HashMap<String, &'a IngredienteBase>,
}

impl<'a> IndiceRecetas<'a> {
    pub fn construir(stock: &[StockItem], costos: &'a Costos) -> Self {
        // Colisión de clave plegada: gana el último registro en orden de
        // iteración, igual que el armado directo de un mapa en el sistema
        // previo. Se preserva por compatibilidad.
        let mut stock_por_nombre = HashMap::new();
        for (i, unidad) in stock.iter().enumerate() {
            stock_por_nombre.insert(clave(&unidad.descripcion), i);
        }

        let mut recetas = HashMap::new();
        for receta in &costos.hamburguesas {
            recetas.insert(clave(&receta.nombre), receta);
        }

        let mut ingredientes = HashMap::new();
        for ingrediente in &costos.ingredientes {
            ingredientes.insert(clave(&ingrediente.nombre), ingrediente);
        }

        Self {
            stock_por_nombre,
            recetas,
            ingredientes,
        }
    }

    // Las búsquedas reciben la clave ya plegada: el llamador normaliza
    // una sola vez por ítem.

    pub fn stock_idx(&self, nombre_plegado: &str) -> Option<usize> {
        self.stock_por_nombre.get(nombre_plegado).copied()
    }

    pub fn receta(&self, nombre_plegado: &str) -> Option<&'a Receta> {
        self.recetas.get(nombre_plegado).copied()
    }

    pub fn ingrediente(&self, nombre_plegado: &str) -> Option<&'a IngredienteBase> {
        self.ingredientes.get(nombre_plegado).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn unidad(descripcion: &str) -> StockItem {
        StockItem {
            id: descripcion.to_string(),
            descripcion: descripcion.to_string(),
            tipo: None,
            padre_id: None,
            cantidad: Some(0.0),
            extra: Map::new(),
        }
    }

    #[test]
    fn busca_por_clave_plegada() {
        let stock = vec![unidad("Carne Picada"), unidad("Coca-Cola")];
        let costos = Costos::default();
        let indice = IndiceRecetas::construir(&stock, &costos);

        assert_eq!(indice.stock_idx("carne picada"), Some(0));
        assert_eq!(indice.stock_idx("coca-cola"), Some(1));
        assert_eq!(indice.stock_idx("Coca-Cola"), None); // el llamador pliega
    }

    #[test]
    fn colision_de_clave_gana_el_ultimo() {
        let stock = vec![unidad("Pan"), unidad("PAN")];
        let costos = Costos::default();
        let indice = IndiceRecetas::construir(&stock, &costos);

        assert_eq!(indice.stock_idx("pan"), Some(1));
    }
}
