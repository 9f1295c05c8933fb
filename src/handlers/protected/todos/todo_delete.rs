use axum::{extract::Path, Extension, Json};
use serde_json::{json, Value};

use crate::database::manager::DatabaseManager;
use crate::database::todos;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::validation;

/// DELETE /todos/:id - remove one item, scoped to the caller
pub async fn todo_delete(
    Extension(CurrentUser(account)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = validation::parse_id(&id).map_err(ApiError::validation)?;

    let pool = DatabaseManager::pool().await?;
    let deleted = todos::delete(&pool, account.id, id).await?;
    if !deleted {
        return Err(ApiError::not_found("Todo not found"));
    }

    Ok(Json(json!({ "message": "Todo deleted successfully" })))
}
