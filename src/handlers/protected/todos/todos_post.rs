use axum::{http::StatusCode, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::manager::DatabaseManager;
use crate::database::models::todo::{DEFAULT_PRIORITY, DEFAULT_STATUS};
use crate::database::todos::{self, NewTodo};
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::validation;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<String>,
}

/// POST /todos - create a todo owned by the authenticated account
pub async fn todos_post(
    Extension(CurrentUser(account)): Extension<CurrentUser>,
    Json(body): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    validation::validate_title(&body.title).map_err(ApiError::validation)?;

    let priority = body
        .priority
        .unwrap_or_else(|| DEFAULT_PRIORITY.to_string());
    validation::validate_priority(&priority).map_err(ApiError::validation)?;

    let status = body.status.unwrap_or_else(|| DEFAULT_STATUS.to_string());
    validation::validate_status(&status).map_err(ApiError::validation)?;

    let due_date = match &body.due_date {
        Some(raw) => validation::parse_due_date(raw).map_err(ApiError::validation)?,
        None => None,
    };

    let pool = DatabaseManager::pool().await?;
    let todo = todos::insert(
        &pool,
        account.id,
        NewTodo {
            title: body.title.trim().to_string(),
            description: body.description.unwrap_or_default(),
            priority,
            status,
            due_date,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Todo Created.", "todo": todo })),
    ))
}
