pub mod cliente;
pub mod costos;
pub mod gastos;
pub mod pedido;
pub mod stock;
