//! HTTP handlers for the Todos API
//!
//! Every endpoint answers with the `{ statusCode, message?, data }`
//! envelope; the HTTP status always matches the enveloped one.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TodoResult;
use crate::models::{CreateTodo, Envelope, ListMeta, Todo, TodoPage, TodoQuery, UpdateTodo};
use crate::repository::TodoRepository;
use crate::service::TodoService;

/// OpenAPI documentation for the Todos API
#[derive(OpenApi)]
#[openapi(
    paths(list_todos, create_todo, get_todo, update_todo, delete_todo),
    components(
        schemas(Todo, CreateTodo, UpdateTodo, TodoPage, ListMeta),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Todos", description = "Todo management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the todos router with all HTTP endpoints
pub fn router<R: TodoRepository + 'static>(service: TodoService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route(
            "/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(shared_service)
}

/// List one window of todos
#[utoipa::path(
    get,
    path = "",
    tag = "Todos",
    params(TodoQuery),
    responses(
        (status = 200, description = "Enveloped window of todos with pagination metadata", body = Envelope<TodoPage>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_todos<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
    Query(query): Query<TodoQuery>,
) -> TodoResult<Json<Envelope<TodoPage>>> {
    let page = service.list_todos(query).await?;
    Ok(Json(Envelope::ok(page)))
}

/// Create a new todo
#[utoipa::path(
    post,
    path = "",
    tag = "Todos",
    request_body = CreateTodo,
    responses(
        (status = 201, description = "Todo created successfully", body = Envelope<Todo>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_todo<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateTodo>,
) -> TodoResult<impl IntoResponse> {
    let todo = service.create_todo(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::created("Todo created successfully", todo)),
    ))
}

/// Get a todo by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Todos",
    params(
        ("id" = Uuid, Path, description = "Todo ID")
    ),
    responses(
        (status = 200, description = "Todo found", body = Envelope<Todo>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_todo<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
    UuidPath(id): UuidPath,
) -> TodoResult<Json<Envelope<Todo>>> {
    let todo = service.get_todo(id).await?;
    Ok(Json(Envelope::ok(todo)))
}

/// Partially update a todo
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Todos",
    params(
        ("id" = Uuid, Path, description = "Todo ID")
    ),
    request_body = UpdateTodo,
    responses(
        (status = 200, description = "Todo updated successfully", body = Envelope<Todo>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_todo<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateTodo>,
) -> TodoResult<Json<Envelope<Todo>>> {
    let todo = service.update_todo(id, input).await?;
    Ok(Json(Envelope::ok_with_message(
        "Todo updated successfully",
        todo,
    )))
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Todos",
    params(
        ("id" = Uuid, Path, description = "Todo ID")
    ),
    responses(
        (status = 200, description = "Todo deleted successfully", body = Envelope<Todo>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_todo<R: TodoRepository>(
    State(service): State<Arc<TodoService<R>>>,
    UuidPath(id): UuidPath,
) -> TodoResult<Json<Envelope<Todo>>> {
    let todo = service.delete_todo(id).await?;
    Ok(Json(Envelope::ok_with_message(
        "Todo deleted successfully",
        todo,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockTodoRepository;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt; // For oneshot()
    use uuid::Uuid;

    async fn json_body(body: Body) -> Value {
        use http_body_util::BodyExt;
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn todo(title: &str) -> Todo {
        Todo::new(CreateTodo {
            title: title.to_string(),
            content: "body".to_string(),
            status: None,
        })
    }

    #[tokio::test]
    async fn test_create_todo_returns_201_envelope() {
        let mut repo = MockTodoRepository::new();
        repo.expect_create().returning(|input| Ok(Todo::new(input)));
        let app = router(TodoService::new(repo));

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_string(&json!({ "title": "Buy milk", "content": "2%" })).unwrap(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["statusCode"], 201);
        assert_eq!(body["message"], "Todo created successfully");
        assert_eq!(body["data"]["title"], "Buy milk");
        assert_eq!(body["data"]["content"], "2%");
        assert!(!body["data"]["_id"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_todo_without_content_is_rejected() {
        let mut repo = MockTodoRepository::new();
        repo.expect_create().never();
        let app = router(TodoService::new(repo));

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_string(&json!({ "title": "Buy milk", "content": "" })).unwrap(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_pagination_window() {
        // 7 todos total, second window of 5
        let mut repo = MockTodoRepository::new();
        repo.expect_list()
            .returning(|_, _, _| Ok(vec![todo("Task6"), todo("Task7")]));
        repo.expect_count().returning(|_| Ok(7));
        let app = router(TodoService::new(repo));

        let request = Request::builder()
            .uri("/?limit=5&offset=5")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["meta"]["total"], 7);
        assert_eq!(body["data"]["meta"]["totalPages"], 2);
        assert_eq!(body["data"]["meta"]["limit"], 5);
        assert_eq!(body["data"]["meta"]["offset"], 5);
    }

    #[tokio::test]
    async fn test_get_missing_todo_returns_404_with_message() {
        let mut repo = MockTodoRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        let app = router(TodoService::new(repo));

        let request = Request::builder()
            .uri(format!("/{}", Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Todo not found");
    }

    #[tokio::test]
    async fn test_update_missing_todo_returns_404_with_message() {
        let mut repo = MockTodoRepository::new();
        repo.expect_update().returning(|_, _| Ok(None));
        let app = router(TodoService::new(repo));

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/{}", Uuid::now_v7()))
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_string(&json!({ "title": "x" })).unwrap(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Todo not found");
    }

    #[tokio::test]
    async fn test_update_returns_envelope_with_message() {
        let mut repo = MockTodoRepository::new();
        repo.expect_update().returning(|_, input| {
            let mut updated = todo("Buy milk");
            if let Some(status) = input.status {
                updated.status = Some(status);
            }
            Ok(Some(updated))
        });
        let app = router(TodoService::new(repo));

        let request = Request::builder()
            .method("PUT")
            .uri(format!("/{}", Uuid::now_v7()))
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_string(&json!({ "status": "done" })).unwrap(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["message"], "Todo updated successfully");
        assert_eq!(body["data"]["status"], "done");
    }

    #[tokio::test]
    async fn test_delete_returns_envelope_with_last_state() {
        let mut repo = MockTodoRepository::new();
        repo.expect_delete().returning(|_| Ok(Some(todo("Doomed"))));
        let app = router(TodoService::new(repo));

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/{}", Uuid::now_v7()))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["statusCode"], 200);
        assert_eq!(body["message"], "Todo deleted successfully");
        assert_eq!(body["data"]["title"], "Doomed");
    }
}
