//! The field value mapping produced by a mapping pass

use cfm_ir::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Field name to typed value, in the order fields were populated
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValueMapping {
    entries: Vec<(String, Value)>,
}

impl FieldValueMapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value for the field if any
    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        let field = field.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(name, _)| *name == field) {
            return Some(std::mem::replace(existing, value));
        }
        self.entries.push((field, value));
        None
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field names in population order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl IntoIterator for FieldValueMapping {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for FieldValueMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut mapping = FieldValueMapping::new();
        assert!(mapping.is_empty());

        assert!(mapping.insert("price", Value::Decimal(12.5)).is_none());
        mapping.insert("name", Value::String("Sofa".into()));

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("price"), Some(&Value::Decimal(12.5)));
        assert!(mapping.contains("name"));
        assert!(!mapping.contains("stock"));
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut mapping = FieldValueMapping::new();
        mapping.insert("stock", Value::Integer(1));
        let previous = mapping.insert("stock", Value::Integer(2));

        assert_eq!(previous, Some(Value::Integer(1)));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("stock"), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_serializes_in_population_order() {
        let mut mapping = FieldValueMapping::new();
        mapping.insert("name", Value::String("Sofa".into()));
        mapping.insert("price", Value::Decimal(12.5));
        mapping.insert("stock", Value::Integer(42));

        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"name":"Sofa","price":12.5,"stock":42}"#);
        assert_eq!(mapping.fields().collect::<Vec<_>>(), vec!["name", "price", "stock"]);
    }
}
