// src/models/gastos.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Ledger de gastos: año → nombre de mes → lista ordenada de conceptos.
/// Las claves de año son strings porque así viven en el archivo.
pub type LibroGastos = BTreeMap<String, BTreeMap<String, Vec<Gasto>>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gasto {
    // Clave lógica del concepto, única por mes cuando se pliega a
    // minúsculas (el store no corrige duplicados preexistentes).
    #[serde(default)]
    pub concepto: String,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub monto: Value,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub fecha: Value,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub pagado: Value,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Gasto {
    /// Entrada en blanco que la proyección siembra en los meses futuros.
    pub fn marcador(concepto: &str) -> Self {
        Self {
            concepto: concepto.to_string(),
            monto: json!(""),
            fecha: json!(""),
            pagado: json!("no"),
            extra: Map::new(),
        }
    }
}

// Mes calendario con nombre de display e índice explícitos: las claves del
// ledger son los nombres en castellano capitalizados.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mes {
    Enero,
    Febrero,
    Marzo,
    Abril,
    Mayo,
    Junio,
    Julio,
    Agosto,
    Septiembre,
    Octubre,
    Noviembre,
    Diciembre,
}

impl Mes {
    pub const TODOS: [Mes; 12] = [
        Mes::Enero,
        Mes::Febrero,
        Mes::Marzo,
        Mes::Abril,
        Mes::Mayo,
        Mes::Junio,
        Mes::Julio,
        Mes::Agosto,
        Mes::Septiembre,
        Mes::Octubre,
        Mes::Noviembre,
        Mes::Diciembre,
    ];

    /// Nombre canónico, tal como se usa de clave en el archivo de gastos.
    pub fn nombre(self) -> &'static str {
        match self {
            Mes::Enero => "Enero",
            Mes::Febrero => "Febrero",
            Mes::Marzo => "Marzo",
            Mes::Abril => "Abril",
            Mes::Mayo => "Mayo",
            Mes::Junio => "Junio",
            Mes::Julio => "Julio",
            Mes::Agosto => "Agosto",
            Mes::Septiembre => "Septiembre",
            Mes::Octubre => "Octubre",
            Mes::Noviembre => "Noviembre",
            Mes::Diciembre => "Diciembre",
        }
    }

    pub fn desde_nombre(nombre: &str) -> Option<Mes> {
        let plegado = nombre.to_lowercase();
        Mes::TODOS
            .into_iter()
            .find(|m| m.nombre().to_lowercase() == plegado)
    }

    pub fn siguiente(self) -> Mes {
        Mes::TODOS[(self as usize + 1) % 12]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desde_nombre_pliega_mayusculas() {
        assert_eq!(Mes::desde_nombre("Marzo"), Some(Mes::Marzo));
        assert_eq!(Mes::desde_nombre("marzo"), Some(Mes::Marzo));
        assert_eq!(Mes::desde_nombre("SEPTIEMBRE"), Some(Mes::Septiembre));
        assert_eq!(Mes::desde_nombre("Smarch"), None);
    }

    #[test]
    fn siguiente_da_la_vuelta_al_anio() {
        assert_eq!(Mes::Enero.siguiente(), Mes::Febrero);
        assert_eq!(Mes::Diciembre.siguiente(), Mes::Enero);
    }

    #[test]
    fn marcador_nace_en_blanco_y_sin_pagar() {
        let g = Gasto::marcador("Internet");
        assert_eq!(g.concepto, "Internet");
        assert_eq!(g.monto, serde_json::json!(""));
        assert_eq!(g.pagado, serde_json::json!("no"));
    }
}
