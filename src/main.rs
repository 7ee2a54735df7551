// src/main.rs

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;

mod common;
mod config;
mod handlers;
mod models;
mod services;
mod store;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Si el directorio de datos no se puede preparar, mejor no arrancar.
    let app_state = AppState::new()
        .await
        .expect("Fallo al inicializar el estado de la aplicación.");

    // Router plano: los paths de colección van sin barra final, así que
    // anidar routers con "/" interno solo traería sorpresas de matching.
    let app = Router::new()
        .route("/ping", get(|| async { Json(json!({ "status": "pong" })) }))
        .route("/api/data", get(handlers::data::get_all_data))
        .route(
            "/api/data/users/authenticate",
            post(handlers::users::authenticate),
        )
        .route("/api/data/users", post(handlers::users::create_user))
        .route(
            "/api/data/users/{username}",
            put(handlers::users::update_user).delete(handlers::users::delete_user),
        )
        .route(
            "/api/data/ingresos",
            get(handlers::ingresos::get_movimientos).post(handlers::ingresos::add_movimiento),
        )
        .route(
            "/api/data/ingresos/{movimiento_id}",
            delete(handlers::ingresos::delete_movimiento),
        )
        .route(
            "/api/data/gastos/month/{month}/year/{year}",
            get(handlers::gastos::get_gastos_mes).put(handlers::gastos::update_gastos_mes),
        )
        .route(
            "/api/data/precios",
            get(handlers::precios::get_precios)
                .post(handlers::precios::add_precio_item)
                .put(handlers::precios::update_all_precios),
        )
        .route(
            "/api/data/precios/{item_id}",
            put(handlers::precios::update_precio_item)
                .delete(handlers::precios::delete_precio_item),
        )
        .route(
            "/api/data/costos",
            get(handlers::costos::get_costos).post(handlers::costos::update_costos),
        )
        .route(
            "/api/data/stock",
            get(handlers::stock::get_stock).post(handlers::stock::add_stock_item),
        )
        .route(
            "/api/data/stock/{item_id}",
            put(handlers::stock::update_stock_item).delete(handlers::stock::delete_stock_item),
        )
        .route(
            "/api/data/rappi-banco",
            get(handlers::rappi_banco::get_rappi_banco)
                .put(handlers::rappi_banco::update_rappi_banco),
        )
        .route("/api/data/clientes", get(handlers::clientes::get_clientes))
        .route("/api/data/pedidos", post(handlers::pedidos::add_pedido))
        .route(
            "/api/data/pedidos/{pedido_id}",
            put(handlers::pedidos::update_pedido).delete(handlers::pedidos::delete_pedido),
        )
        .route(
            "/api/data/vencimientos",
            get(handlers::vencimientos::get_vencimientos)
                .post(handlers::vencimientos::add_vencimiento_item),
        )
        .route(
            "/api/data/vencimientos/{item_id}",
            put(handlers::vencimientos::update_vencimiento_item)
                .delete(handlers::vencimientos::delete_vencimiento_item),
        )
        .route(
            "/api/data/proveedores",
            get(handlers::proveedores::get_proveedores)
                .post(handlers::proveedores::save_proveedores),
        )
        .with_state(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Fallo al iniciar el listener TCP");
    tracing::info!("🚀 Servidor escuchando en {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Error en el servidor Axum");
}
