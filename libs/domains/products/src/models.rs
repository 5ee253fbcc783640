use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Product entity - represents a product stored in MongoDB
///
/// Products are schema-flexible: apart from the identity and the name,
/// every field the caller supplied at creation time is kept verbatim in
/// the record and round-trips through `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Any additional fields accepted at creation time
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Document,
}

/// DTO for creating a new product
///
/// No field constraints are enforced here; input validation is the
/// caller's concern for this resource.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProduct {
    pub name: String,
    /// Arbitrary additional fields stored alongside the name
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Document,
}

/// DTO for partially updating an existing product
///
/// Only the fields present are merged onto the record; everything else
/// is left untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProduct {
    pub name: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Document,
}

/// Query parameters for listing products
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ProductQuery {
    /// Case-insensitive substring to match against product names
    pub search: Option<String>,
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: i64,
    /// Maximum number of records per page
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// One page of products together with the window it was cut from
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPage {
    pub data: Vec<Product>,
    /// Total number of records matching the filter, across all pages
    pub total: u64,
    pub page: i64,
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    5
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            search: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl Product {
    /// Create a new product from a CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let mut extra = input.extra;
        // The identity is assigned here and only here
        extra.remove("_id");
        extra.remove("id");

        Self {
            id: Uuid::now_v7(),
            name: input.name,
            extra,
        }
    }
}

impl UpdateProduct {
    /// Flatten the update into a `$set` document of exactly the
    /// provided fields.
    pub fn into_set_document(self) -> Document {
        let mut set = self.extra;
        // The identity is immutable
        set.remove("_id");
        set.remove("id");

        if let Some(name) = self.name {
            set.insert("name", name);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_new_product_keeps_extra_fields() {
        let input = CreateProduct {
            name: "Laptop".to_string(),
            extra: doc! { "price": 999, "brand": "Acme" },
        };

        let product = Product::new(input);
        assert_eq!(product.name, "Laptop");
        assert_eq!(product.extra.get_i32("price").unwrap(), 999);
        assert_eq!(product.extra.get_str("brand").unwrap(), "Acme");
    }

    #[test]
    fn test_new_product_discards_supplied_identity() {
        let input = CreateProduct {
            name: "Laptop".to_string(),
            extra: doc! { "_id": "forged", "id": "forged-too" },
        };

        let product = Product::new(input);
        assert!(product.extra.is_empty());
    }

    #[test]
    fn test_set_document_contains_only_provided_fields() {
        let update = UpdateProduct {
            name: Some("Renamed".to_string()),
            extra: doc! { "price": 1099 },
        };

        let set = update.into_set_document();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get_str("name").unwrap(), "Renamed");
        assert_eq!(set.get_i32("price").unwrap(), 1099);
    }

    #[test]
    fn test_set_document_skips_absent_name() {
        let update = UpdateProduct {
            name: None,
            extra: doc! { "stock": 3 },
        };

        let set = update.into_set_document();
        assert!(!set.contains_key("name"));
        assert_eq!(set.get_i32("stock").unwrap(), 3);
    }

    #[test]
    fn test_set_document_never_touches_identity() {
        let update = UpdateProduct {
            name: None,
            extra: doc! { "_id": "forged", "id": "forged-too", "color": "red" },
        };

        let set = update.into_set_document();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_str("color").unwrap(), "red");
    }

    #[test]
    fn test_set_document_is_stable_under_repetition() {
        let update = UpdateProduct {
            name: Some("Same".to_string()),
            extra: doc! { "price": 5 },
        };

        let first = update.clone().into_set_document();
        let second = update.into_set_document();
        assert_eq!(first, second);
    }

    #[test]
    fn test_product_serializes_id_as_underscore_id() {
        let product = Product::new(CreateProduct {
            name: "Widget".to_string(),
            extra: Document::new(),
        });

        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("_id").is_some());
        assert_eq!(value["name"], "Widget");
    }

    #[test]
    fn test_query_defaults() {
        let query = ProductQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 5);
        assert!(query.search.is_none());
    }
}
