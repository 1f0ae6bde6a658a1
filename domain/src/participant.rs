//! Participant records
//!
//! A participant is a name plus a free-form map of domain-specific fields,
//! mirroring the JSON files produced by the data generator. Field access is
//! always lenient: a missing or mistyped field reads as "no preference",
//! never as an error. Whether a field is *required* is a per-solver concern.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single participant's preference record.
///
/// # Example
///
/// ```
/// use consenso_domain::Participant;
///
/// let p: Participant = serde_json::from_str(
///     r#"{"nombre": "Ana Garcia", "zona": "Zona 10", "presupuesto_max": 500,
///         "destinos_interes": ["Tikal", "Antigua Guatemala"]}"#,
/// ).unwrap();
///
/// assert_eq!(p.name, "Ana Garcia");
/// assert_eq!(p.text("zona"), Some("Zona 10"));
/// assert_eq!(p.number("presupuesto_max"), Some(500.0));
/// assert_eq!(p.list("destinos_interes").len(), 2);
/// assert!(p.list("actividades").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Display name, used for canonical ordering and task assignment
    #[serde(rename = "nombre", default)]
    pub name: String,

    /// Domain-specific fields (availability, budget, skills, ...)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Participant {
    /// Create a participant with no fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Map::new(),
        }
    }

    /// Set a field, builder style
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Set a list field from string items, builder style
    pub fn with_list(self, key: impl Into<String>, items: &[&str]) -> Self {
        let value = Value::Array(items.iter().map(|s| Value::String(s.to_string())).collect());
        self.with_field(key, value)
    }

    /// Read a list-valued field as strings, preserving order.
    ///
    /// Missing fields, non-array values and non-string items read as empty.
    pub fn list(&self, field: &str) -> Vec<String> {
        match self.fields.get(field) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Read a list nested one level down (e.g. `disponibilidad.fechas`).
    pub fn nested_list(&self, field: &str, sub: &str) -> Vec<String> {
        match self.fields.get(field) {
            Some(Value::Object(inner)) => match inner.get(sub) {
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Read a numeric field.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.fields.get(field).and_then(Value::as_f64)
    }

    /// Read a string field.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_meeting_record() {
        let p: Participant = serde_json::from_value(json!({
            "tipo": "reunion",
            "nombre": "Carlos Lopez",
            "disponibilidad": {
                "fechas": ["2026-01-15", "2026-01-16"],
                "horas": ["19:00-22:00"]
            },
            "zona": "Zona 1 - Centro Historico",
            "restricciones_alimentarias": ["vegetariano"]
        }))
        .unwrap();

        assert_eq!(p.name, "Carlos Lopez");
        assert_eq!(
            p.nested_list("disponibilidad", "fechas"),
            vec!["2026-01-15", "2026-01-16"]
        );
        assert_eq!(p.nested_list("disponibilidad", "horas"), vec!["19:00-22:00"]);
        assert_eq!(p.text("tipo"), Some("reunion"));
    }

    #[test]
    fn test_missing_fields_read_as_empty() {
        let p = Participant::new("Ana");
        assert!(p.list("destinos_interes").is_empty());
        assert!(p.nested_list("disponibilidad", "fechas").is_empty());
        assert_eq!(p.number("presupuesto_max"), None);
        assert_eq!(p.text("zona"), None);
    }

    #[test]
    fn test_mistyped_field_reads_as_empty() {
        let p = Participant::new("Ana").with_field("destinos_interes", json!("Tikal"));
        assert!(p.list("destinos_interes").is_empty());
    }

    #[test]
    fn test_builder_list() {
        let p = Participant::new("Ana").with_list("actividades", &["playa", "cultura"]);
        assert_eq!(p.list("actividades"), vec!["playa", "cultura"]);
    }

    #[test]
    fn test_roundtrip_preserves_name_key() {
        let p = Participant::new("Ana").with_field("zona", json!("Zona 10"));
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["nombre"], "Ana");
        assert_eq!(value["zona"], "Zona 10");
    }
}
