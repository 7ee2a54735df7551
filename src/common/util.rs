// src/common/util.rs

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Timestamp local en el formato que ya usan los archivos de datos
/// (compatible con `datetime.isoformat()`: sin zona horaria).
pub fn ahora_iso() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Coerción laxa a número: acepta números JSON y strings numéricos.
/// Los archivos históricos mezclan `"cantidad": 3` con `"cantidad": "3"`.
pub fn como_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// `deserialize_with` para campos numéricos opcionales con coerción laxa.
/// Un valor presente pero no coercible se lee como None (nunca corta la
/// deserialización de toda la colección).
pub fn opt_f64_laxo<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(v.as_ref().and_then(como_f64))
}

/// `deserialize_with` para un campo `Option<Value>` que tiene que
/// conservar el null explícito: ausente queda None (vía default) y un
/// null presente queda `Some(Value::Null)`.
pub fn valor_presente<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// `deserialize_with` para campos donde "ausente" y "null explícito"
/// significan cosas distintas (un `Option<Option<T>>` pelado colapsa los
/// dos casos en None).
pub fn doble_opcion<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Clave de búsqueda normalizada: todos los joins por nombre del sistema
/// son case-insensitive.
pub fn clave(nombre: &str) -> String {
    nombre.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn como_f64_acepta_numeros_y_strings() {
        assert_eq!(como_f64(&json!(2.5)), Some(2.5));
        assert_eq!(como_f64(&json!("3")), Some(3.0));
        assert_eq!(como_f64(&json!(" 1.25 ")), Some(1.25));
        assert_eq!(como_f64(&json!("tres")), None);
        assert_eq!(como_f64(&json!(null)), None);
        assert_eq!(como_f64(&json!([1])), None);
    }

    #[test]
    fn clave_pliega_mayusculas() {
        assert_eq!(clave("Carne Picada"), "carne picada");
        assert_eq!(clave("COCA-COLA"), "coca-cola");
    }
}
