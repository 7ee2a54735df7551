// src/config.rs

use std::env;
use std::path::PathBuf;

use crate::services::{gastos_service::GastosService, pedido_service::PedidoService};
use crate::store::JsonStore;

#[derive(Clone)]
pub struct AppState {
    pub store: JsonStore,
    pub pedido_service: PedidoService,
    pub gastos_service: GastosService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "datos".to_string());
        let store = JsonStore::new(PathBuf::from(&data_dir));
        store.inicializar().await?;

        tracing::info!("✅ Directorio de datos listo en '{}'", data_dir);

        // --- Arma el grafo de dependencias ---
        let pedido_service = PedidoService::new(store.clone());
        let gastos_service = GastosService::new(store.clone());

        Ok(Self {
            store,
            pedido_service,
            gastos_service,
        })
    }
}
