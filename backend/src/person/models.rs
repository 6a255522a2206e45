//! Person data model
//!
//! A Person is an identifier plus an open set of fields. The API never looks
//! inside the fields; they are carried as a JSON object flattened next to `id`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unique identifier for a person
pub type PersonId = i64;

/// A stored (or about to be stored) person record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Identifier, `None` until the store assigns one
    #[serde(default)]
    pub id: Option<PersonId>,
    /// Every other field of the record, passed through untouched
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Person {
    /// Create a person without an identifier
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { id: None, fields }
    }

    /// Return the same record carrying the given identifier
    pub fn with_id(mut self, id: PersonId) -> Self {
        self.id = Some(id);
        self
    }

    /// Look up a single field by name
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_without_id() {
        let person: Person = serde_json::from_value(json!({"name": "Alice", "age": 30})).unwrap();
        assert_eq!(person.id, None);
        assert_eq!(person.field("name"), Some(&json!("Alice")));
        assert_eq!(person.field("age"), Some(&json!(30)));
        assert!(!person.fields.contains_key("id"));
    }

    #[test]
    fn test_deserialize_with_id_keeps_it_out_of_fields() {
        let person: Person = serde_json::from_value(json!({"id": 7, "name": "Bob"})).unwrap();
        assert_eq!(person.id, Some(7));
        assert_eq!(person.fields.len(), 1);
    }

    #[test]
    fn test_serialize_flattens_fields() {
        let mut fields = Map::new();
        fields.insert("name".to_string(), json!("Carol"));
        let person = Person::new(fields).with_id(3);

        let value = serde_json::to_value(&person).unwrap();
        assert_eq!(value, json!({"id": 3, "name": "Carol"}));
    }

    #[test]
    fn test_with_id_overrides_existing_id() {
        let person = Person::default().with_id(99).with_id(5);
        assert_eq!(person.id, Some(5));
    }
}
