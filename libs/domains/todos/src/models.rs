use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Todo entity - represents a todo stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Todo {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Short title, required and non-empty
    pub title: String,
    /// Body text, required and non-empty
    pub content: String,
    /// Free-text status, no enforced transitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// DTO for creating a new todo
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTodo {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    pub status: Option<String>,
}

/// DTO for partially updating an existing todo
///
/// Fields left out stay untouched; fields that are present are held to
/// the same constraints as at creation time.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTodo {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    pub status: Option<String>,
}

/// Query parameters for listing todos
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct TodoQuery {
    /// Case-insensitive substring to match against todo titles
    pub search: Option<String>,
    /// Maximum number of records to return
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of matching records to skip
    #[serde(default)]
    pub offset: u64,
}

/// Pagination metadata for a todo listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ListMeta {
    pub limit: i64,
    pub offset: u64,
    /// Total number of records matching the filter, across all pages
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

/// One window of todos plus its pagination metadata
#[derive(Debug, Serialize, ToSchema)]
pub struct TodoPage {
    pub items: Vec<Todo>,
    pub meta: ListMeta,
}

/// Uniform response envelope for the todos API
///
/// Every todo endpoint answers with `{ statusCode, message?, data }`;
/// the `statusCode` mirrors the HTTP status of the response.
#[derive(Debug, Serialize, ToSchema)]
pub struct Envelope<T> {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

fn default_limit() -> i64 {
    5
}

impl Default for TodoQuery {
    fn default() -> Self {
        Self {
            search: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Todo {
    /// Create a new todo from a CreateTodo DTO
    pub fn new(input: CreateTodo) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            content: input.content,
            status: input.status,
        }
    }
}

impl UpdateTodo {
    /// Flatten the update into a `$set` document of exactly the
    /// provided fields.
    pub fn into_set_document(self) -> Document {
        let mut set = Document::new();
        if let Some(title) = self.title {
            set.insert("title", title);
        }
        if let Some(content) = self.content {
            set.insert("content", content);
        }
        if let Some(status) = self.status {
            set.insert("status", status);
        }
        set
    }
}

impl ListMeta {
    /// Compute pagination metadata for a window.
    ///
    /// `total_pages` is `ceil(total / limit)`, so an empty result set
    /// has zero pages and an exact division adds no trailing page.
    pub fn new(limit: i64, offset: u64, total: u64) -> Self {
        Self {
            limit,
            offset,
            total,
            total_pages: total.div_ceil(limit.max(1) as u64),
        }
    }
}

impl<T> Envelope<T> {
    /// 200 envelope without a message
    pub fn ok(data: T) -> Self {
        Self {
            status_code: 200,
            message: None,
            data,
        }
    }

    /// 200 envelope with a message
    pub fn ok_with_message(message: &str, data: T) -> Self {
        Self {
            status_code: 200,
            message: Some(message.to_string()),
            data,
        }
    }

    /// 201 envelope with a message
    pub fn created(message: &str, data: T) -> Self {
        Self {
            status_code: 201,
            message: Some(message.to_string()),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(title: &str) -> Todo {
        Todo::new(CreateTodo {
            title: title.to_string(),
            content: "body".to_string(),
            status: None,
        })
    }

    #[test]
    fn test_meta_zero_total_has_zero_pages() {
        let meta = ListMeta::new(5, 0, 0);
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn test_meta_exact_division_adds_no_extra_page() {
        let meta = ListMeta::new(5, 0, 10);
        assert_eq!(meta.total_pages, 2);
    }

    #[test]
    fn test_meta_partial_page_rounds_up() {
        let meta = ListMeta::new(5, 5, 7);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(meta.offset, 5);
    }

    #[test]
    fn test_meta_serializes_total_pages_camel_case() {
        let value = serde_json::to_value(ListMeta::new(5, 0, 7)).unwrap();
        assert_eq!(value["totalPages"], 2);
        assert_eq!(value["total"], 7);
        assert_eq!(value["limit"], 5);
        assert_eq!(value["offset"], 0);
    }

    #[test]
    fn test_created_envelope_shape() {
        let value = serde_json::to_value(Envelope::created(
            "Todo created successfully",
            todo("Buy milk"),
        ))
        .unwrap();

        assert_eq!(value["statusCode"], 201);
        assert_eq!(value["message"], "Todo created successfully");
        assert_eq!(value["data"]["title"], "Buy milk");
    }

    #[test]
    fn test_ok_envelope_omits_message() {
        let value = serde_json::to_value(Envelope::ok(todo("Quiet"))).unwrap();
        assert_eq!(value["statusCode"], 200);
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_todo_without_status_omits_the_field() {
        let value = serde_json::to_value(todo("No status")).unwrap();
        assert!(value.get("status").is_none());
        assert!(value.get("_id").is_some());
    }

    #[test]
    fn test_set_document_contains_only_provided_fields() {
        let set = UpdateTodo {
            title: Some("New title".to_string()),
            content: None,
            status: None,
        }
        .into_set_document();

        assert_eq!(set.len(), 1);
        assert_eq!(set.get_str("title").unwrap(), "New title");
    }

    #[test]
    fn test_set_document_is_stable_under_repetition() {
        let update = UpdateTodo {
            title: Some("Same".to_string()),
            content: Some("Same body".to_string()),
            status: Some("done".to_string()),
        };

        let first = update.clone().into_set_document();
        let second = update.into_set_document();
        assert_eq!(first, second);
    }

    #[test]
    fn test_update_validation_rejects_empty_required_fields() {
        use validator::Validate;

        let update = UpdateTodo {
            title: Some(String::new()),
            content: None,
            status: None,
        };
        assert!(update.validate().is_err());

        let update = UpdateTodo {
            title: Some("ok".to_string()),
            content: Some(String::new()),
            status: None,
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_create_validation_requires_title_and_content() {
        use validator::Validate;

        let missing_content = CreateTodo {
            title: "Buy milk".to_string(),
            content: String::new(),
            status: None,
        };
        assert!(missing_content.validate().is_err());

        let valid = CreateTodo {
            title: "Buy milk".to_string(),
            content: "2%".to_string(),
            status: None,
        };
        assert!(valid.validate().is_ok());
    }
}
