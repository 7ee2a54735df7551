pub mod clientes;
pub mod costos;
pub mod crud;
pub mod data;
pub mod gastos;
pub mod ingresos;
pub mod pedidos;
pub mod precios;
pub mod proveedores;
pub mod rappi_banco;
pub mod stock;
pub mod users;
pub mod vencimientos;
