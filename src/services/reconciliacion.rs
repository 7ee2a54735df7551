// src/services/reconciliacion.rs
//
// Reconciliación de stock: traduce los ítems de un pedido vendido a
// deltas con signo sobre el ledger de inventario, pasando por la doble
// indirección ítem vendido → receta → ingrediente base → unidad de stock.

use crate::common::util::{clave, como_f64};
use crate::models::costos::Costos;
use crate::models::pedido::Pedido;
use crate::models::stock::StockItem;
use crate::services::recetario::IndiceRecetas;

/// Aplica los deltas de cantidad de un pedido sobre el stock en memoria.
///
/// `signo` = -1.0 descuenta (venta nueva), +1.0 repone (venta revertida).
/// Política de mejor esfuerzo por ítem: una línea malformada o un join
/// que no cierra se loggea y se saltea, nunca aborta el pedido entero.
///
/// OJO: esta función no es idempotente por sí sola (aplicarla dos veces
/// con el mismo signo duplica el efecto). La consistencia del ledger la
/// garantiza la disciplina revertir-y-reaplicar del ciclo de vida del
/// pedido. El llamador persiste la colección completa de stock después.
pub fn aplicar_pedido_al_stock(
    stock: &mut [StockItem],
    costos: &Costos,
    pedido: &Pedido,
    signo: f64,
) {
    let indice = IndiceRecetas::construir(stock, costos);

    for item in &pedido.items {
        let nombre = clave(&item.descripcion);
        // La cantidad ausente ya entró como 1 al deserializar; acá un
        // valor no coercible (incluido el null explícito) saltea la línea.
        let cantidad = match como_f64(&item.cantidad) {
            Some(c) => c,
            None => {
                tracing::warn!(
                    item = %item.descripcion,
                    cantidad = %item.cantidad,
                    "Cantidad inválida en el ítem del pedido, se saltea"
                );
                continue;
            }
        };

        if let Some(receta) = indice.receta(&nombre) {
            // Es una hamburguesa: descontamos cada ingrediente de la receta.
            for ingrediente_receta in &receta.ingredientes {
                let alias = clave(&ingrediente_receta.nombre);
                let Some(base) = indice.ingrediente(&alias) else {
                    tracing::warn!(
                        ingrediente = %ingrediente_receta.nombre,
                        receta = %receta.nombre,
                        "Ingrediente de receta no encontrado en costos"
                    );
                    continue;
                };

                // Convención de nombres: el nombre canónico del
                // ingrediente base ES su descripción en el stock.
                let nombre_stock = clave(&base.nombre);
                let Some(idx) = indice.stock_idx(&nombre_stock) else {
                    tracing::warn!(
                        ingrediente = %base.nombre,
                        "Ingrediente de receta no encontrado en stock"
                    );
                    continue;
                };

                let uso = base.uso_por_hamburguesa.unwrap_or(0.0);
                let delta = uso * cantidad * signo;
                let unidad = &mut stock[idx];
                unidad.cantidad = Some(unidad.cantidad.unwrap_or(0.0) + delta);
            }
        } else if let Some(idx) = indice.stock_idx(&nombre) {
            // Ítem directo del stock (una bebida, por ejemplo).
            let unidad = &mut stock[idx];
            unidad.cantidad = Some(unidad.cantidad.unwrap_or(0.0) + cantidad * signo);
        } else {
            // Ni receta ni stock: no afecta inventario (un "Delivery").
            tracing::info!(item = %nombre, "El ítem no afecta stock");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::costos::{IngredienteBase, IngredienteReceta, Receta};
    use crate::models::pedido::{EstadoPedido, ItemPedido};
    use serde_json::{json, Map, Value};

    fn unidad(descripcion: &str, cantidad: f64) -> StockItem {
        StockItem {
            id: descripcion.to_string(),
            descripcion: descripcion.to_string(),
            tipo: None,
            padre_id: None,
            cantidad: Some(cantidad),
            extra: Map::new(),
        }
    }

    fn costos_de_prueba() -> Costos {
        Costos {
            ingredientes: vec![
                IngredienteBase {
                    nombre: "Carne Picada".into(),
                    uso_por_hamburguesa: Some(0.25),
                    extra: Map::new(),
                },
                IngredienteBase {
                    nombre: "Pan".into(),
                    uso_por_hamburguesa: Some(1.0),
                    extra: Map::new(),
                },
            ],
            hamburguesas: vec![Receta {
                nombre: "Hamburguesa Clásica".into(),
                ingredientes: vec![
                    IngredienteReceta {
                        nombre: "carne picada".into(),
                        extra: Map::new(),
                    },
                    IngredienteReceta {
                        nombre: "Pan".into(),
                        extra: Map::new(),
                    },
                ],
                extra: Map::new(),
            }],
            extra: Map::new(),
        }
    }

    fn pedido_con(items: Vec<(&str, Value)>) -> Pedido {
        Pedido {
            id: "p1".into(),
            items: items
                .into_iter()
                .map(|(d, c)| ItemPedido {
                    descripcion: d.to_string(),
                    cantidad: c,
                    extra: Map::new(),
                })
                .collect(),
            estado: EstadoPedido::Entregado,
            direccion: String::new(),
            fecha_creacion: None,
            fecha_entrega: None,
            extra: Map::new(),
        }
    }

    fn cantidad_de(stock: &[StockItem], descripcion: &str) -> f64 {
        stock
            .iter()
            .find(|u| u.descripcion == descripcion)
            .and_then(|u| u.cantidad)
            .unwrap()
    }

    #[test]
    fn una_receta_descuenta_cada_ingrediente_por_su_tasa() {
        let mut stock = vec![unidad("Carne Picada", 10.0), unidad("Pan", 50.0)];
        let pedido = pedido_con(vec![("Hamburguesa Clásica", json!(3))]);

        aplicar_pedido_al_stock(&mut stock, &costos_de_prueba(), &pedido, -1.0);

        // uso 0.25 × cantidad 3
        assert_eq!(cantidad_de(&stock, "Carne Picada"), 10.0 - 0.75);
        assert_eq!(cantidad_de(&stock, "Pan"), 47.0);
    }

    #[test]
    fn un_item_directo_descuenta_su_cantidad() {
        let mut stock = vec![unidad("Coca-Cola", 12.0)];
        let pedido = pedido_con(vec![("coca-cola", json!(2))]);

        aplicar_pedido_al_stock(&mut stock, &Costos::default(), &pedido, -1.0);

        assert_eq!(cantidad_de(&stock, "Coca-Cola"), 10.0);
    }

    #[test]
    fn cantidades_como_string_se_coercionan() {
        let mut stock = vec![unidad("Coca-Cola", 12.0)];
        let pedido = pedido_con(vec![("Coca-Cola", json!("2"))]);

        aplicar_pedido_al_stock(&mut stock, &Costos::default(), &pedido, -1.0);

        assert_eq!(cantidad_de(&stock, "Coca-Cola"), 10.0);
    }

    #[test]
    fn cantidad_ausente_cuenta_como_uno() {
        let mut stock = vec![unidad("Coca-Cola", 12.0)];
        // Sin campo cantidad en el wire: el default de deserialización es 1.
        let pedido: Pedido = serde_json::from_value(json!({
            "id": "p1",
            "items": [{ "descripcion": "Coca-Cola" }],
            "estado": "entregado",
            "direccion": ""
        }))
        .unwrap();

        aplicar_pedido_al_stock(&mut stock, &Costos::default(), &pedido, -1.0);

        assert_eq!(cantidad_de(&stock, "Coca-Cola"), 11.0);
    }

    #[test]
    fn cantidad_null_explicita_saltea_la_linea() {
        // Distinto del campo ausente: un null mandado a propósito no vale
        // 1, la línea no toca el stock.
        let mut stock = vec![unidad("Coca-Cola", 12.0), unidad("Pan", 50.0)];
        let pedido = pedido_con(vec![("Coca-Cola", Value::Null), ("Pan", json!(2))]);

        aplicar_pedido_al_stock(&mut stock, &Costos::default(), &pedido, -1.0);

        assert_eq!(cantidad_de(&stock, "Coca-Cola"), 12.0);
        assert_eq!(cantidad_de(&stock, "Pan"), 48.0);
    }

    #[test]
    fn una_linea_mala_no_aborta_el_resto_del_pedido() {
        let mut stock = vec![unidad("Coca-Cola", 12.0), unidad("Pan", 50.0)];
        let pedido = pedido_con(vec![
            ("Coca-Cola", json!("tres")), // no coercible: se saltea
            ("Pan", json!(1)),
        ]);

        aplicar_pedido_al_stock(&mut stock, &Costos::default(), &pedido, -1.0);

        assert_eq!(cantidad_de(&stock, "Coca-Cola"), 12.0);
        assert_eq!(cantidad_de(&stock, "Pan"), 49.0);
    }

    #[test]
    fn ingrediente_sin_unidad_de_stock_se_saltea_sin_abortar() {
        // "Pan" está en costos pero no en stock: solo la carne se mueve.
        let mut stock = vec![unidad("Carne Picada", 10.0)];
        let pedido = pedido_con(vec![("Hamburguesa Clásica", json!(1))]);

        aplicar_pedido_al_stock(&mut stock, &costos_de_prueba(), &pedido, -1.0);

        assert_eq!(cantidad_de(&stock, "Carne Picada"), 9.75);
    }

    #[test]
    fn un_item_que_no_es_receta_ni_stock_no_toca_nada() {
        let mut stock = vec![unidad("Pan", 50.0)];
        let pedido = pedido_con(vec![("Delivery", json!(1))]);

        aplicar_pedido_al_stock(&mut stock, &Costos::default(), &pedido, -1.0);

        assert_eq!(cantidad_de(&stock, "Pan"), 50.0);
    }

    #[test]
    fn revertir_y_reaplicar_deja_el_stock_identico() {
        let mut stock = vec![
            unidad("Carne Picada", 10.0),
            unidad("Pan", 50.0),
            unidad("Coca-Cola", 12.0),
        ];
        let original: Vec<f64> = stock.iter().map(|u| u.cantidad.unwrap()).collect();
        let costos = costos_de_prueba();
        let pedido = pedido_con(vec![
            ("Hamburguesa Clásica", json!(2)),
            ("Coca-Cola", json!(3)),
        ]);

        aplicar_pedido_al_stock(&mut stock, &costos, &pedido, 1.0);
        aplicar_pedido_al_stock(&mut stock, &costos, &pedido, -1.0);

        let final_: Vec<f64> = stock.iter().map(|u| u.cantidad.unwrap()).collect();
        assert_eq!(original, final_);
    }
}
