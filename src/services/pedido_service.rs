// src/services/pedido_service.rs
//
// Ciclo de vida del pedido. Las transiciones acá son en el fondo sobre la
// consistencia del stock, no sobre el estado del pedido: toda edición
// revierte primero el efecto original y recién después aplica el nuevo,
// para que nunca queden deltas parciales del estado previo a la edición.

use serde_json::Map;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::common::util::{ahora_iso, clave};
use crate::models::cliente::Cliente;
use crate::models::costos::Costos;
use crate::models::pedido::{CambiosPedido, EstadoPedido, Pedido};
use crate::models::stock::StockItem;
use crate::services::reconciliacion::aplicar_pedido_al_stock;
use crate::store::{coleccion, JsonStore};

#[derive(Clone)]
pub struct PedidoService {
    store: JsonStore,
}

impl PedidoService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Crea un pedido. Comportamiento heredado y no negociable: todo
    /// pedido nace finalizado (`estado = entregado`, ambas fechas en el
    /// momento de creación) y descuenta stock al instante.
    pub async fn crear(&self, mut pedido: Pedido) -> Result<Pedido, AppError> {
        let _guard = self.store.bloqueo_escritura().await;

        pedido.id = Uuid::new_v4().to_string();
        pedido.estado = EstadoPedido::Entregado;
        let ahora = ahora_iso();
        pedido.fecha_creacion = Some(ahora.clone());
        pedido.fecha_entrega = Some(ahora);

        let mut pedidos: Vec<Pedido> = self.store.load(coleccion::PEDIDOS, Vec::new()).await?;
        pedidos.push(pedido.clone());
        self.store.store(coleccion::PEDIDOS, &pedidos).await?;

        self.ajustar_stock(&pedido, -1.0).await?;
        self.asegurar_cliente(&pedido).await?;
        self.recalcular_cliente(&pedido).await?;

        tracing::info!(id = %pedido.id, "Pedido creado y stock descontado");
        Ok(pedido)
    }

    /// Edita un pedido: revierte el efecto del original sobre el stock,
    /// mergea los cambios y reaplica con los ítems nuevos. Si el id no
    /// existe no se muta nada (tampoco se revierte).
    pub async fn actualizar(&self, id: &str, cambios: CambiosPedido) -> Result<Pedido, AppError> {
        let _guard = self.store.bloqueo_escritura().await;

        let mut pedidos: Vec<Pedido> = self.store.load(coleccion::PEDIDOS, Vec::new()).await?;
        let Some(idx) = pedidos.iter().position(|p| p.id == id) else {
            return Err(AppError::NoEncontrado("Pedido"));
        };
        let original = pedidos[idx].clone();

        let mut stock: Vec<StockItem> = self.store.load(coleccion::STOCK, Vec::new()).await?;
        let costos: Costos = self.store.load(coleccion::COSTOS, Costos::default()).await?;

        // 1. Reponemos el stock del pedido tal como estaba ANTES de editar.
        aplicar_pedido_al_stock(&mut stock, &costos, &original, 1.0);

        // 2. Merge de los cambios, con las reglas de fecha de entrega.
        let pedido = &mut pedidos[idx];
        if let Some(items) = cambios.items {
            pedido.items = items;
        }
        if let Some(direccion) = cambios.direccion {
            pedido.direccion = direccion;
        }
        if let Some(fecha_creacion) = cambios.fecha_creacion {
            pedido.fecha_creacion = Some(fecha_creacion);
        }
        if let Some(fecha_entrega) = cambios.fecha_entrega {
            pedido.fecha_entrega = fecha_entrega;
        }
        if let Some(estado) = cambios.estado {
            pedido.estado = estado;
            match estado {
                // Marcar entregado estampa la fecha solo si el pedido
                // todavía no tenía una.
                EstadoPedido::Entregado
                    if original.fecha_entrega.as_deref().unwrap_or("").is_empty() =>
                {
                    pedido.fecha_entrega = Some(ahora_iso());
                }
                EstadoPedido::Pendiente => {
                    pedido.fecha_entrega = None;
                }
                _ => {}
            }
        }
        for (k, v) in cambios.extra {
            pedido.extra.insert(k, v);
        }

        // 3. Descontamos el stock del pedido ya actualizado.
        aplicar_pedido_al_stock(&mut stock, &costos, &pedidos[idx], -1.0);
        self.store.store(coleccion::STOCK, &stock).await?;
        self.store.store(coleccion::PEDIDOS, &pedidos).await?;

        let actualizado = pedidos[idx].clone();
        if original.estado != actualizado.estado {
            self.recalcular_cliente(&actualizado).await?;
        }
        if original.direccion != actualizado.direccion {
            self.asegurar_cliente(&actualizado).await?;
        }

        tracing::info!(id = %actualizado.id, "Pedido actualizado");
        Ok(actualizado)
    }

    /// Elimina un pedido reponiendo antes todo su efecto sobre el stock.
    pub async fn eliminar(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.store.bloqueo_escritura().await;

        let mut pedidos: Vec<Pedido> = self.store.load(coleccion::PEDIDOS, Vec::new()).await?;
        let Some(pedido) = pedidos.iter().find(|p| p.id == id).cloned() else {
            return Err(AppError::NoEncontrado("Pedido"));
        };

        self.ajustar_stock(&pedido, 1.0).await?;

        pedidos.retain(|p| p.id != id);
        self.store.store(coleccion::PEDIDOS, &pedidos).await?;

        self.recalcular_cliente(&pedido).await?;

        tracing::info!(id = %pedido.id, "Pedido eliminado y stock repuesto");
        Ok(())
    }

    // Carga stock y costos, aplica el pedido con el signo dado y persiste
    // la colección completa de stock (incluidas las unidades sin tocar).
    async fn ajustar_stock(&self, pedido: &Pedido, signo: f64) -> Result<(), AppError> {
        let mut stock: Vec<StockItem> = self.store.load(coleccion::STOCK, Vec::new()).await?;
        let costos: Costos = self.store.load(coleccion::COSTOS, Costos::default()).await?;
        aplicar_pedido_al_stock(&mut stock, &costos, pedido, signo);
        self.store.store(coleccion::STOCK, &stock).await
    }

    // Da de alta el resumen de cliente para la dirección del pedido si
    // todavía no existe. La dirección normalizada es la clave.
    async fn asegurar_cliente(&self, pedido: &Pedido) -> Result<(), AppError> {
        let direccion = pedido.direccion.trim();
        if direccion.is_empty() {
            return Ok(());
        }

        let mut clientes: Vec<Cliente> = self.store.load(coleccion::CLIENTES, Vec::new()).await?;
        let ya_existe = clientes
            .iter()
            .any(|c| clave(c.direccion.trim()) == clave(direccion));
        if !ya_existe {
            let numero = clientes.len() as u64 + 1;
            clientes.push(Cliente {
                id: Uuid::new_v4().to_string(),
                numero,
                direccion: direccion.to_string(),
                cantidad_pedidos: 0,
                ultimo_pedido_fecha: None,
                extra: Map::new(),
            });
            self.store.store(coleccion::CLIENTES, &clientes).await?;
        }
        Ok(())
    }

    // Recomputa el resumen derivado del cliente desde la colección de
    // pedidos: cuántos entregados tiene la dirección y la última entrega.
    async fn recalcular_cliente(&self, pedido: &Pedido) -> Result<(), AppError> {
        let direccion = pedido.direccion.trim();
        if direccion.is_empty() {
            return Ok(());
        }

        let mut clientes: Vec<Cliente> = self.store.load(coleccion::CLIENTES, Vec::new()).await?;
        let Some(cliente) = clientes
            .iter_mut()
            .find(|c| clave(c.direccion.trim()) == clave(direccion))
        else {
            return Ok(());
        };

        let pedidos: Vec<Pedido> = self.store.load(coleccion::PEDIDOS, Vec::new()).await?;
        let entregados: Vec<&Pedido> = pedidos
            .iter()
            .filter(|p| {
                clave(p.direccion.trim()) == clave(direccion)
                    && p.estado == EstadoPedido::Entregado
            })
            .collect();

        cliente.cantidad_pedidos = entregados.len() as u64;
        cliente.ultimo_pedido_fecha = entregados
            .iter()
            .max_by_key(|p| p.fecha_entrega.clone().unwrap_or_default())
            .and_then(|p| p.fecha_entrega.clone());

        self.store.store(coleccion::CLIENTES, &clientes).await
    }
}
