// src/handlers/crud.rs
//
// Accesores genéricos sobre el record store para las colecciones que son
// CRUD uniforme (precios, vencimientos, ingresos, stock). Los registros
// se manejan crudos: solo interpretamos `id` y `padre_id`.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::services::cascada::resolver_descendientes;
use crate::store::JsonStore;

pub type Registro = Map<String, Value>;

fn id_de(registro: &Registro) -> Option<&str> {
    registro.get("id").and_then(Value::as_str)
}

pub async fn listar(store: &JsonStore, coleccion: &str) -> Result<Vec<Registro>, AppError> {
    store.load(coleccion, Vec::new()).await
}

/// Agrega un registro, asignándole un UUID si no trae id (o lo trae vacío).
pub async fn agregar(
    store: &JsonStore,
    coleccion: &str,
    mut item: Registro,
) -> Result<Registro, AppError> {
    let _guard = store.bloqueo_escritura().await;

    if !id_de(&item).is_some_and(|id| !id.is_empty()) {
        item.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
    }

    let mut registros: Vec<Registro> = store.load(coleccion, Vec::new()).await?;
    registros.push(item.clone());
    store.store(coleccion, &registros).await?;
    Ok(item)
}

/// Merge de campos sobre el registro con ese id. El id original siempre
/// se preserva, mande lo que mande el payload.
pub async fn actualizar(
    store: &JsonStore,
    coleccion: &str,
    id: &str,
    cambios: Registro,
    que: &'static str,
) -> Result<Registro, AppError> {
    let _guard = store.bloqueo_escritura().await;

    let mut registros: Vec<Registro> = store.load(coleccion, Vec::new()).await?;
    let Some(registro) = registros.iter_mut().find(|r| id_de(r) == Some(id)) else {
        return Err(AppError::NoEncontrado(que));
    };

    for (k, v) in cambios {
        registro.insert(k, v);
    }
    registro.insert("id".into(), Value::String(id.to_string()));
    let actualizado = registro.clone();

    store.store(coleccion, &registros).await?;
    Ok(actualizado)
}

/// Borra solo el registro con ese id (sin cascada).
pub async fn eliminar(
    store: &JsonStore,
    coleccion: &str,
    id: &str,
    que: &'static str,
) -> Result<(), AppError> {
    let _guard = store.bloqueo_escritura().await;

    let mut registros: Vec<Registro> = store.load(coleccion, Vec::new()).await?;
    let antes = registros.len();
    registros.retain(|r| id_de(r) != Some(id));
    if registros.len() == antes {
        return Err(AppError::NoEncontrado(que));
    }

    store.store(coleccion, &registros).await
}

/// Borra el registro y toda su rama de descendientes por `padre_id`.
pub async fn eliminar_cascada(
    store: &JsonStore,
    coleccion: &str,
    id: &str,
    que: &'static str,
) -> Result<(), AppError> {
    let _guard = store.bloqueo_escritura().await;

    let registros: Vec<Registro> = store.load(coleccion, Vec::new()).await?;
    let a_borrar = resolver_descendientes(&registros, id, que)?;
    let filtrados: Vec<Registro> = registros
        .into_iter()
        // Los registros sin id se quedan: la cascada no puede alcanzarlos.
        .filter(|r| id_de(r).is_none_or(|rid| !a_borrar.contains(rid)))
        .collect();

    store.store(coleccion, &filtrados).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registro(v: Value) -> Registro {
        v.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn agregar_asigna_id_solo_si_falta() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let con_id = agregar(&store, "precios", registro(json!({ "id": "p1", "nombre": "Combo" })))
            .await
            .unwrap();
        assert_eq!(con_id["id"], json!("p1"));

        let sin_id = agregar(&store, "precios", registro(json!({ "nombre": "Otro" })))
            .await
            .unwrap();
        assert!(!sin_id["id"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn actualizar_preserva_el_id_original() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        agregar(&store, "precios", registro(json!({ "id": "p1", "precio": 100 })))
            .await
            .unwrap();

        let actualizado = actualizar(
            &store,
            "precios",
            "p1",
            registro(json!({ "precio": 150, "id": "troyano" })),
            "Ítem de precio",
        )
        .await
        .unwrap();

        assert_eq!(actualizado["id"], json!("p1"));
        assert_eq!(actualizado["precio"], json!(150));
    }

    #[tokio::test]
    async fn eliminar_cascada_borra_la_rama_entera() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        store
            .store(
                "precios",
                &json!([
                    { "id": "raiz" },
                    { "id": "hijo", "padre_id": "raiz" },
                    { "id": "nieto", "padre_id": "hijo" },
                    { "id": "ajeno" }
                ]),
            )
            .await
            .unwrap();

        eliminar_cascada(&store, "precios", "raiz", "Ítem de precio")
            .await
            .unwrap();

        let quedan = listar(&store, "precios").await.unwrap();
        assert_eq!(quedan.len(), 1);
        assert_eq!(quedan[0]["id"], json!("ajeno"));
    }

    #[tokio::test]
    async fn eliminar_algo_inexistente_es_404() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        store.store("ingresos", &json!([])).await.unwrap();

        let err = eliminar(&store, "ingresos", "nada", "Movimiento")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoEncontrado("Movimiento")));
    }
}
