pub mod cascada;
pub mod gastos_service;
pub mod pedido_service;
pub mod recetario;
pub mod reconciliacion;
