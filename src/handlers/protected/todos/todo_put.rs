use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::manager::DatabaseManager;
use crate::database::todos::{self, TodoChanges};
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::validation;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<String>,
}

/// PUT /todos/:id - partial update, scoped to the caller
///
/// Only fields present in the request change. An empty dueDate clears the
/// due date.
pub async fn todo_put(
    Extension(CurrentUser(account)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTodoRequest>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id).map_err(ApiError::validation)?;
    let changes = changes_from(body).map_err(ApiError::validation)?;

    let pool = DatabaseManager::pool().await?;
    let todo = todos::update(&pool, account.id, id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Todo not found"))?;

    Ok(Json(json!({ "message": "Todo Updated", "todo": todo })))
}

fn changes_from(body: UpdateTodoRequest) -> Result<TodoChanges, String> {
    if let Some(title) = &body.title {
        validation::validate_title(title)?;
    }
    if let Some(priority) = &body.priority {
        validation::validate_priority(priority)?;
    }
    if let Some(status) = &body.status {
        validation::validate_status(status)?;
    }
    let due_date = match body.due_date {
        Some(raw) => Some(validation::parse_due_date(&raw)?),
        None => None,
    };

    Ok(TodoChanges {
        title: body.title.map(|t| t.trim().to_string()),
        description: body.description,
        priority: body.priority,
        status: body.status,
        due_date,
    })
}
