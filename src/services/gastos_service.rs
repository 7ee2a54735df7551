// src/services/gastos_service.rs
//
// Gastos recurrentes: al cerrar la lista de un mes, los conceptos que
// aparecen por primera vez se siembran hacia adelante en los próximos
// 120 meses como entradas en blanco sin pagar.

use std::collections::HashSet;

use crate::common::error::AppError;
use crate::common::util::clave;
use crate::models::gastos::{Gasto, LibroGastos, Mes};
use crate::store::{coleccion, JsonStore};

#[derive(Clone)]
pub struct GastosService {
    store: JsonStore,
}

impl GastosService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Lista de gastos de un (año, mes); vacía si el bucket no existe.
    pub async fn listar_mes(&self, anio: &str, mes: &str) -> Result<Vec<Gasto>, AppError> {
        let libro: LibroGastos = self.store.load(coleccion::GASTOS, LibroGastos::new()).await?;
        Ok(libro
            .get(anio)
            .and_then(|meses| meses.get(mes))
            .cloned()
            .unwrap_or_default())
    }

    /// Pisa la lista autoritativa de (año, mes) con `lista` y propaga los
    /// conceptos genuinamente nuevos a los 120 meses siguientes.
    ///
    /// "Nuevo" se decide contra el estado previamente guardado del bucket,
    /// no contra la lista entrante. En los meses futuros solo se agrega:
    /// las entradas existentes no se tocan ni se borran, y la supresión de
    /// duplicados (case-insensitive) es por bucket, no global.
    pub async fn actualizar_mes(
        &self,
        anio: &str,
        mes: &str,
        lista: Vec<Gasto>,
    ) -> Result<(), AppError> {
        let mes = Mes::desde_nombre(mes)
            .ok_or_else(|| AppError::DatoInvalido(format!("Mes desconocido: {mes}")))?;
        let anio: i32 = anio
            .parse()
            .map_err(|_| AppError::DatoInvalido(format!("Año inválido: {anio}")))?;

        let _guard = self.store.bloqueo_escritura().await;
        let mut libro: LibroGastos = self.store.load(coleccion::GASTOS, LibroGastos::new()).await?;

        let previos: HashSet<String> = libro
            .get(&anio.to_string())
            .and_then(|meses| meses.get(mes.nombre()))
            .map(|gastos| gastos.iter().map(|g| clave(&g.concepto)).collect())
            .unwrap_or_default();
        let nuevos: Vec<Gasto> = lista
            .iter()
            .filter(|g| !previos.contains(&clave(&g.concepto)))
            .cloned()
            .collect();

        libro
            .entry(anio.to_string())
            .or_default()
            .insert(mes.nombre().to_string(), lista);

        if !nuevos.is_empty() {
            tracing::info!(
                cantidad = nuevos.len(),
                mes = mes.nombre(),
                anio,
                "Propagando conceptos nuevos a los próximos 120 meses"
            );
            let mut anio_futuro = anio;
            let mut mes_futuro = mes;
            for _ in 0..120 {
                if mes_futuro == Mes::Diciembre {
                    anio_futuro += 1;
                }
                mes_futuro = mes_futuro.siguiente();

                let bucket = libro
                    .entry(anio_futuro.to_string())
                    .or_default()
                    .entry(mes_futuro.nombre().to_string())
                    .or_default();
                let presentes: HashSet<String> =
                    bucket.iter().map(|g| clave(&g.concepto)).collect();
                for nuevo in &nuevos {
                    if !presentes.contains(&clave(&nuevo.concepto)) {
                        bucket.push(Gasto::marcador(&nuevo.concepto));
                    }
                }
            }
        }

        self.store.store(coleccion::GASTOS, &libro).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entorno() -> (tempfile::TempDir, GastosService, JsonStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonStore::new(dir.path());
        let service = GastosService::new(store.clone());
        (dir, service, store)
    }

    fn gasto(concepto: &str, monto: &str) -> Gasto {
        serde_json::from_value(json!({
            "concepto": concepto,
            "monto": monto,
            "fecha": "2024-03-05",
            "pagado": "si"
        }))
        .unwrap()
    }

    async fn libro(store: &JsonStore) -> LibroGastos {
        store.load(coleccion::GASTOS, LibroGastos::new()).await.unwrap()
    }

    fn conceptos(libro: &LibroGastos, anio: &str, mes: &str) -> Vec<String> {
        libro
            .get(anio)
            .and_then(|m| m.get(mes))
            .map(|gs| gs.iter().map(|g| g.concepto.clone()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn un_concepto_nuevo_se_siembra_120_meses_adelante() {
        let (_dir, service, store) = entorno();

        service
            .actualizar_mes("2024", "Marzo", vec![gasto("Internet", "15000")])
            .await
            .unwrap();

        let libro = libro(&store).await;
        // El mes siguiente y el último de la ventana tienen el marcador.
        assert_eq!(conceptos(&libro, "2024", "Abril"), vec!["Internet"]);
        assert_eq!(conceptos(&libro, "2034", "Marzo"), vec!["Internet"]);
        // La ventana son exactamente 120 meses: Abril 2034 queda afuera.
        assert!(conceptos(&libro, "2034", "Abril").is_empty());

        // El marcador nace en blanco y sin pagar.
        let abril = &libro["2024"]["Abril"][0];
        assert_eq!(abril.monto, json!(""));
        assert_eq!(abril.pagado, json!("no"));
    }

    #[tokio::test]
    async fn una_entrada_futura_cargada_a_mano_no_se_toca() {
        let (_dir, service, store) = entorno();

        // Julio 2024 ya tiene un "Internet" cargado a mano con monto.
        store
            .store(
                coleccion::GASTOS,
                &json!({
                    "2024": { "Julio": [
                        { "concepto": "Internet", "monto": "17500", "fecha": "2024-07-01", "pagado": "si" }
                    ]}
                }),
            )
            .await
            .unwrap();

        service
            .actualizar_mes("2024", "Marzo", vec![gasto("Internet", "15000")])
            .await
            .unwrap();

        let libro = libro(&store).await;
        let julio = &libro["2024"]["Julio"];
        assert_eq!(julio.len(), 1);
        assert_eq!(julio[0].monto, json!("17500"));
    }

    #[tokio::test]
    async fn la_comparacion_de_conceptos_no_distingue_mayusculas() {
        let (_dir, service, store) = entorno();

        store
            .store(
                coleccion::GASTOS,
                &json!({
                    "2024": { "Junio": [
                        { "concepto": "Internet", "monto": "", "fecha": "", "pagado": "no" }
                    ]}
                }),
            )
            .await
            .unwrap();

        // Se finaliza marzo con "internet" en minúsculas.
        service
            .actualizar_mes("2024", "Marzo", vec![gasto("internet", "15000")])
            .await
            .unwrap();

        let libro = libro(&store).await;
        // Junio ya tenía el concepto (plegado): no se duplica.
        assert_eq!(libro["2024"]["Junio"].len(), 1);
    }

    #[tokio::test]
    async fn reenviar_la_misma_lista_no_vuelve_a_propagar() {
        let (_dir, service, store) = entorno();

        service
            .actualizar_mes("2024", "Marzo", vec![gasto("Alquiler", "90000")])
            .await
            .unwrap();

        // Segunda pasada con el mismo concepto: contra el estado previo ya
        // guardado no hay nada nuevo.
        service
            .actualizar_mes("2024", "Marzo", vec![gasto("Alquiler", "95000")])
            .await
            .unwrap();

        let libro = libro(&store).await;
        assert_eq!(libro["2024"]["Abril"].len(), 1);
        // La lista autoritativa del mes sí quedó pisada.
        assert_eq!(libro["2024"]["Marzo"][0].monto, json!("95000"));
    }

    #[tokio::test]
    async fn la_ventana_cruza_el_cambio_de_anio() {
        let (_dir, service, store) = entorno();

        service
            .actualizar_mes("2024", "Diciembre", vec![gasto("Luz", "30000")])
            .await
            .unwrap();

        let libro = libro(&store).await;
        assert_eq!(conceptos(&libro, "2025", "Enero"), vec!["Luz"]);
        assert_eq!(conceptos(&libro, "2034", "Diciembre"), vec!["Luz"]);
        assert!(conceptos(&libro, "2035", "Enero").is_empty());
    }

    #[tokio::test]
    async fn un_mes_desconocido_es_dato_invalido() {
        let (_dir, service, _store) = entorno();

        let err = service
            .actualizar_mes("2024", "Smarch", vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DatoInvalido(_)));
    }
}
