use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::database::accounts;
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::CurrentUser;

/// DELETE /users/account - remove the authenticated account
///
/// The todos foreign key cascades, so the account's items are removed in
/// the same statement.
pub async fn account_delete(
    Extension(CurrentUser(account)): Extension<CurrentUser>,
) -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    accounts::delete(&pool, account.id).await?;

    tracing::info!("account {} deleted", account.id);
    Ok(Json(json!({ "message": "Account deleted." })))
}
