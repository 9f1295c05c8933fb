use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::middleware::CurrentUser;

/// GET /users/profile - the authenticated account's public fields
pub async fn profile_get(Extension(CurrentUser(account)): Extension<CurrentUser>) -> Json<Value> {
    Json(json!({ "user": account.public_profile() }))
}
