use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    db::entities::todo,
    error::{AppError, INVALID_ID, TITLE_REQUIRED},
    response::{ApiResult, JsonResponse},
    services::{
        ServiceContext,
        todo_service::{CreateTodoInput, TodoService, UpdateTodoInput},
    },
    state::AppState,
};

pub const BASE_PATH: &str = "/api/todos";

const LIST_FAILED: &str = "failed to fetch todos";
const FIND_FAILED: &str = "failed to fetch todo";
const CREATE_FAILED: &str = "failed to create todo";
const UPDATE_FAILED: &str = "failed to update todo";
const DELETE_FAILED: &str = "failed to delete todo";

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
}

/// `completed` falls back to `false` when omitted or null, so a PUT without
/// it reopens the todo.
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i32,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

pub fn router(state: Arc<AppState>) -> Router {
    let collection = get(list_todos).post(create_todo);
    let item = get(get_todo).put(update_todo).delete(delete_todo);

    Router::new()
        .route(BASE_PATH, collection.clone())
        .route(&format!("{BASE_PATH}/"), collection)
        .route(&format!("{BASE_PATH}/{{id}}"), item)
        .with_state(state)
}

async fn list_todos(State(state): State<Arc<AppState>>) -> ApiResult<Vec<TodoResponse>> {
    let todos = todo_service_from_state(&state)
        .list_todos()
        .await
        .map_err(|err| AppError::from_service(err, LIST_FAILED))?;
    JsonResponse::ok(todos.into_iter().map(TodoResponse::from).collect())
}

async fn get_todo(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> ApiResult<TodoResponse> {
    let id = parse_id(&raw_id)?;
    let todo = todo_service_from_state(&state)
        .get_todo(id)
        .await
        .map_err(|err| AppError::from_service(err, FIND_FAILED))?;
    JsonResponse::ok(todo.into())
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    payload: Bytes,
) -> ApiResult<TodoResponse> {
    let body: CreateTodoRequest = parse_body(&payload)?;
    if body.title.is_empty() {
        return Err(AppError::bad_request(TITLE_REQUIRED));
    }

    let todo = todo_service_from_state(&state)
        .create_todo(CreateTodoInput { title: body.title })
        .await
        .map_err(|err| AppError::from_service(err, CREATE_FAILED))?;
    JsonResponse::created(todo.into())
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    payload: Bytes,
) -> ApiResult<TodoResponse> {
    let id = parse_id(&raw_id)?;
    let body: UpdateTodoRequest = parse_body(&payload)?;
    if body.title.is_empty() {
        return Err(AppError::bad_request(TITLE_REQUIRED));
    }

    let todo = todo_service_from_state(&state)
        .update_todo(
            id,
            UpdateTodoInput {
                title: body.title,
                completed: body.completed.unwrap_or(false),
            },
        )
        .await
        .map_err(|err| AppError::from_service(err, UPDATE_FAILED))?;
    JsonResponse::ok(todo.into())
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&raw_id)?;
    todo_service_from_state(&state)
        .delete_todo(id)
        .await
        .map_err(|err| AppError::from_service(err, DELETE_FAILED))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Bodies are parsed as JSON whatever `Content-Type` says. Any body that does
/// not bind to the request shape means the title is missing.
fn parse_body<T: DeserializeOwned>(payload: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(payload).map_err(|_| AppError::bad_request(TITLE_REQUIRED))
}

/// Plain base-10 digits that fit in a `u64`; signs and whitespace are
/// rejected.
fn parse_id(raw: &str) -> Result<u64, AppError> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(AppError::bad_request(INVALID_ID));
    }
    raw.parse::<u64>()
        .map_err(|_| AppError::bad_request(INVALID_ID))
}

impl From<todo::Model> for TodoResponse {
    fn from(model: todo::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            completed: model.completed,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

fn todo_service_from_state(state: &AppState) -> TodoService {
    ServiceContext::from_state(state).todo()
}
