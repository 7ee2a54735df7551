// src/services/cascada.rs
//
// Resolución de cascada sobre colecciones planas con puntero al padre.
// La usan igual el catálogo de stock, la lista de precios y el catálogo
// de vencimientos: borrar un nodo borra toda su rama.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::common::error::AppError;

/// Lo mínimo que la cascada necesita de un registro: su id y el id del
/// padre. El join por ids queda detrás de este seam.
pub trait NodoArbol {
    fn id(&self) -> Option<&str>;
    fn padre_id(&self) -> Option<&str>;
}

// Los catálogos se manejan como registros crudos; los campos que no son
// id/padre_id pasan de largo.
impl NodoArbol for Map<String, Value> {
    fn id(&self) -> Option<&str> {
        self.get("id").and_then(Value::as_str)
    }

    fn padre_id(&self) -> Option<&str> {
        self.get("padre_id").and_then(Value::as_str)
    }
}

/// Clausura transitiva de descendientes de `raiz`, incluida la raíz.
///
/// Construye la vista de adyacencia (padre → hijos) una sola vez y recorre
/// con una pila explícita. El set de visitados es el guardián contra
/// ciclos: un registro malformado que apunte su `padre_id` hacia un
/// descendiente propio no cuelga el recorrido. Falla con NoEncontrado si
/// la raíz no está en la colección; `que` es el sujeto del mensaje.
pub fn resolver_descendientes<N: NodoArbol>(
    items: &[N],
    raiz: &str,
    que: &'static str,
) -> Result<HashSet<String>, AppError> {
    if !items.iter().any(|n| n.id() == Some(raiz)) {
        return Err(AppError::NoEncontrado(que));
    }

    let mut hijos: HashMap<&str, Vec<&str>> = HashMap::new();
    for item in items {
        if let (Some(id), Some(padre)) = (item.id(), item.padre_id()) {
            hijos.entry(padre).or_default().push(id);
        }
    }

    let mut visitados: HashSet<String> = HashSet::new();
    let mut pila = vec![raiz];
    while let Some(actual) = pila.pop() {
        if !visitados.insert(actual.to_string()) {
            continue;
        }
        if let Some(hs) = hijos.get(actual) {
            for hijo in hs {
                if !visitados.contains(*hijo) {
                    pila.push(hijo);
                }
            }
        }
    }

    Ok(visitados)
}
