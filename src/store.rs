// src/store.rs
//
// El "Record Store": cada colección es un archivo JSON plano dentro del
// directorio de datos. Cada operación carga la colección completa, la muta
// en memoria y la reescribe entera (sin escrituras parciales).

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::common::error::AppError;

// Nombres de colección (un archivo `<nombre>.json` por cada una).
pub mod coleccion {
    pub const USERS: &str = "users";
    pub const INGRESOS: &str = "ingresos";
    pub const GASTOS: &str = "gastos";
    pub const PRECIOS: &str = "precios";
    pub const COSTOS: &str = "costos";
    pub const STOCK: &str = "stock";
    pub const PEDIDOS: &str = "pedidos";
    pub const CLIENTES: &str = "clientes";
    pub const RAPPI_BANCO: &str = "rappi_banco";
    pub const VENCIMIENTOS: &str = "vencimientos";
    pub const PROVEEDORES: &str = "proveedores";
}

#[derive(Clone)]
pub struct JsonStore {
    dir: PathBuf,
    // Punto único de serialización: toda operación mutante sostiene este
    // lock durante su ciclo completo de leer-modificar-escribir. Los
    // clientes no ven ningún token de concurrencia; solo desaparece la
    // carrera a nivel de archivo.
    escritor: Arc<Mutex<()>>,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            escritor: Arc::new(Mutex::new(())),
        }
    }

    /// Toma el lock de escritor. El guard se sostiene durante todo el
    /// leer-modificar-escribir de la operación que muta.
    pub async fn bloqueo_escritura(&self) -> OwnedMutexGuard<()> {
        self.escritor.clone().lock_owned().await
    }

    fn ruta(&self, coleccion: &str) -> PathBuf {
        self.dir.join(format!("{coleccion}.json"))
    }

    /// Lee una colección. Si el archivo no existe, lo inicializa de forma
    /// durable con `default` y devuelve ese valor. Si el contenido está
    /// corrupto, devuelve `default` sin romper (el dato malo queda en
    /// disco hasta la próxima escritura).
    pub async fn load<T>(&self, coleccion: &str, default: T) -> Result<T, AppError>
    where
        T: DeserializeOwned + Serialize,
    {
        match tokio::fs::read_to_string(self.ruta(coleccion)).await {
            Ok(texto) => match serde_json::from_str(&texto) {
                Ok(datos) => Ok(datos),
                Err(e) => {
                    tracing::warn!(
                        coleccion,
                        error = %e,
                        "Colección corrupta, usando valor por defecto"
                    );
                    Ok(default)
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.store(coleccion, &default).await?;
                Ok(default)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Sobrescribe la colección completa.
    pub async fn store<T>(&self, coleccion: &str, datos: &T) -> Result<(), AppError>
    where
        T: Serialize + ?Sized,
    {
        tokio::fs::create_dir_all(&self.dir).await?;
        let texto = serde_json::to_string_pretty(datos)
            .map_err(|e| anyhow::anyhow!("serializando '{coleccion}': {e}"))?;
        tokio::fs::write(self.ruta(coleccion), texto).await?;
        Ok(())
    }

    /// Crea los archivos de datos que falten, con su valor por defecto
    /// por colección.
    pub async fn inicializar(&self) -> Result<(), AppError> {
        let admin = json!([{
            "usuario": "admin",
            "contrasena": "admin",
            "rol": "admin",
            "frase_bienvenida": "¡Bienvenido, Admin!"
        }]);
        self.load(coleccion::USERS, admin).await?;
        self.load(coleccion::GASTOS, json!({})).await?;
        self.load(
            coleccion::COSTOS,
            json!({ "ingredientes": [], "hamburguesas": [] }),
        )
        .await?;
        self.load(coleccion::RAPPI_BANCO, json!({ "rappi": 0, "banco": 0 }))
            .await?;
        for nombre in [
            coleccion::INGRESOS,
            coleccion::PRECIOS,
            coleccion::STOCK,
            coleccion::PEDIDOS,
            coleccion::CLIENTES,
            coleccion::VENCIMIENTOS,
            coleccion::PROVEEDORES,
        ] {
            self.load(nombre, json!([])).await?;
        }
        Ok(())
    }
}
