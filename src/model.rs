use serde::{Deserialize, Serialize};

/// Catalog record as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    pub id: u64,
    pub nombre: String,
    pub precio: f64,
}

/// Request body for create/update. The id travels in the URL, never in the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductoInput {
    pub nombre: String,
    pub precio: f64,
}

pub const MSG_NAME_REQUIRED: &str = "El nombre es obligatorio";
pub const MSG_PRICE_INVALID: &str = "El precio debe ser un número mayor o igual a 0";
pub const MSG_CREATED: &str = "Producto creado correctamente";
pub const MSG_UPDATED: &str = "Producto actualizado correctamente";
pub const MSG_DELETED: &str = "Producto eliminado correctamente";

// Local validation runs before any request is issued; a failure here
// means no network call happens for this submit.
pub fn validate_input(nombre: &str, precio: &str) -> Result<ProductoInput, String> {
    let nombre = nombre.trim();
    if nombre.is_empty() {
        return Err(MSG_NAME_REQUIRED.to_string());
    }
    let precio: f64 = match precio.trim().parse() {
        Ok(v) => v,
        Err(_) => return Err(MSG_PRICE_INVALID.to_string()),
    };
    if !precio.is_finite() || precio < 0.0 {
        return Err(MSG_PRICE_INVALID.to_string());
    }
    Ok(ProductoInput {
        nombre: nombre.to_string(),
        precio,
    })
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    // Base URL of the catalog API; ${VAR} references are expanded from
    // the environment. CATALOGO_API_URL takes precedence when set.
    #[serde(default)]
    pub api_url: Option<String>,
    // Optional path to an ASCII logo file for the header.
    #[serde(default)]
    pub logo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validate_trims_name_and_parses_price() {
        let input = validate_input("  Gadget  ", "15").unwrap();
        assert_eq!(input.nombre, "Gadget");
        assert_eq!(input.precio, 15.0);
        let input = validate_input("Widget", " 9.5 ").unwrap();
        assert_eq!(input.precio, 9.5);
    }

    #[test]
    fn validate_rejects_empty_or_whitespace_name() {
        assert_eq!(validate_input("", "10").unwrap_err(), MSG_NAME_REQUIRED);
        assert_eq!(validate_input("   ", "10").unwrap_err(), MSG_NAME_REQUIRED);
    }

    #[test]
    fn validate_rejects_bad_prices() {
        assert_eq!(validate_input("X", "").unwrap_err(), MSG_PRICE_INVALID);
        assert_eq!(validate_input("X", "abc").unwrap_err(), MSG_PRICE_INVALID);
        assert_eq!(validate_input("X", "-1").unwrap_err(), MSG_PRICE_INVALID);
        assert_eq!(validate_input("X", "NaN").unwrap_err(), MSG_PRICE_INVALID);
        assert_eq!(validate_input("X", "inf").unwrap_err(), MSG_PRICE_INVALID);
    }

    #[test]
    fn validate_accepts_zero_price() {
        assert_eq!(validate_input("X", "0").unwrap().precio, 0.0);
    }

    #[test]
    fn producto_matches_wire_shape() {
        let p: Producto =
            serde_json::from_value(json!({"id": 1, "nombre": "Widget", "precio": 9.5})).unwrap();
        assert_eq!(p.id, 1);
        assert_eq!(p.nombre, "Widget");
        assert_eq!(p.precio, 9.5);
    }

    #[test]
    fn input_body_never_carries_an_id() {
        let body = serde_json::to_value(ProductoInput {
            nombre: "Gadget".into(),
            precio: 15.0,
        })
        .unwrap();
        assert_eq!(body, json!({"nombre": "Gadget", "precio": 15.0}));
        assert!(body.get("id").is_none());
    }

    #[test]
    fn config_defaults_when_fields_missing() {
        let cfg: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert!(cfg.api_url.is_none());
        assert!(cfg.logo.is_none());
    }
}
