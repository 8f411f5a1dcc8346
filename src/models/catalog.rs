//! Catalog entities
//!
//! Canonical category/product shapes and normalization of loosely-shaped
//! records coming from the remote API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A subcategory nested under a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    /// Id of the owning category
    #[serde(rename = "parentId")]
    pub parent_id: String,
}

/// A product category with its subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub subcategories: Vec<Subcategory>,
}

/// A product record. Opaque to the cache, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(pub Value);

impl Product {
    /// Returns the product's id when it carries one.
    pub fn id(&self) -> Option<&str> {
        self.0
            .get("_id")
            .or_else(|| self.0.get("id"))
            .and_then(Value::as_str)
    }
}

// == Normalization ==
/// Maps a raw category record into the canonical [`Category`] shape.
///
/// Never fails: missing or mistyped fields fall back to empty values, and
/// every subcategory's `parent_id` is set to the owning category's id.
pub fn normalize_category(raw: &Map<String, Value>) -> Category {
    let id = record_id(raw);

    let subcategories = match raw.get("subcategories") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_object)
            .map(|sub| Subcategory {
                id: record_id(sub),
                name: string_field(sub, "name"),
                parent_id: id.clone(),
            })
            .collect(),
        _ => Vec::new(),
    };

    Category {
        name: string_field(raw, "name"),
        description: string_field(raw, "description"),
        subcategories,
        id,
    }
}

/// Reads `_id`, then `id`. Numeric ids are stringified.
fn record_id(raw: &Map<String, Value>) -> String {
    match raw.get("_id").or_else(|| raw.get("id")) {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => String::new(),
    }
}

fn string_field(raw: &Map<String, Value>, field: &str) -> String {
    raw.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_normalize_minimal_record() {
        let category = normalize_category(&object(json!({ "_id": "x" })));

        assert_eq!(
            category,
            Category {
                id: "x".to_string(),
                name: String::new(),
                description: String::new(),
                subcategories: vec![],
            }
        );
    }

    #[test]
    fn test_normalize_full_record() {
        let raw = object(json!({
            "_id": "c1",
            "name": "Chairs",
            "description": "Seating",
            "subcategories": [
                { "_id": "s1", "name": "Armchairs" },
                { "id": "s2", "name": "Stools", "parentId": "elsewhere" }
            ]
        }));

        let category = normalize_category(&raw);
        assert_eq!(category.name, "Chairs");
        assert_eq!(category.description, "Seating");
        assert_eq!(category.subcategories.len(), 2);
        assert_eq!(category.subcategories[1].id, "s2");
        assert!(category.subcategories.iter().all(|s| s.parent_id == "c1"));
    }

    #[test]
    fn test_normalize_mistyped_fields() {
        let raw = object(json!({
            "id": 17,
            "name": null,
            "description": ["not", "a", "string"],
            "subcategories": "none"
        }));

        let category = normalize_category(&raw);
        assert_eq!(category.id, "17");
        assert_eq!(category.name, "");
        assert_eq!(category.description, "");
        assert!(category.subcategories.is_empty());
    }

    #[test]
    fn test_normalize_skips_non_object_subcategories() {
        let raw = object(json!({
            "_id": "c2",
            "subcategories": ["loose", 3, { "_id": "s9" }]
        }));

        let category = normalize_category(&raw);
        assert_eq!(category.subcategories.len(), 1);
        assert_eq!(category.subcategories[0].id, "s9");
        assert_eq!(category.subcategories[0].name, "");
    }

    #[test]
    fn test_empty_object_normalizes() {
        let category = normalize_category(&Map::new());
        assert_eq!(category.id, "");
        assert!(category.subcategories.is_empty());
    }

    #[test]
    fn test_subcategory_serializes_parent_id_camel_case() {
        let sub = Subcategory {
            id: "s1".to_string(),
            name: "Sofas".to_string(),
            parent_id: "c1".to_string(),
        };
        let json = serde_json::to_value(&sub).unwrap();
        assert_eq!(json["parentId"], "c1");
    }

    #[test]
    fn test_product_is_passed_through() {
        let raw = json!({ "_id": "p1", "price": 199.0, "tags": ["oak"] });
        let product: Product = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(product.id(), Some("p1"));
        assert_eq!(serde_json::to_value(&product).unwrap(), raw);
    }
}
