use axum::{extract::Path, Extension, Json};
use serde_json::{json, Value};

use crate::database::manager::DatabaseManager;
use crate::database::todos;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::validation;

/// GET /todos/:id - fetch one item, scoped to the caller
///
/// A todo that exists but belongs to someone else is indistinguishable from
/// one that does not exist.
pub async fn todo_get(
    Extension(CurrentUser(account)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id).map_err(ApiError::validation)?;

    let pool = DatabaseManager::pool().await?;
    let todo = todos::find_by_id(&pool, account.id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Todo not found"))?;

    Ok(Json(json!({ "todo": todo })))
}
