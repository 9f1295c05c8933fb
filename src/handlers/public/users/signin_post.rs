use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth;
use crate::database::accounts;
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// POST /users/signin - exchange email + password for a bearer token
///
/// Unknown email and wrong password produce the identical response, so the
/// endpoint cannot be used to probe which addresses are registered.
pub async fn signin_post(Json(body): Json<SigninRequest>) -> Result<Json<Value>, ApiError> {
    let email = body.email.trim().to_lowercase();

    let pool = DatabaseManager::pool().await?;
    let Some(account) = accounts::find_by_email(&pool, &email).await? else {
        return Err(invalid_credentials());
    };

    let password = body.password;
    let hash = account.password_hash.clone();
    let matches = tokio::task::spawn_blocking(move || auth::verify_password(&password, &hash))
        .await
        .map_err(|e| ApiError::internal(format!("verify task failed: {}", e)))?
        .map_err(|e| ApiError::internal(format!("password verification failed: {}", e)))?;

    if !matches {
        return Err(invalid_credentials());
    }

    let token = auth::issue_token(account.id, &account.email)
        .map_err(|e| ApiError::internal(format!("token generation failed: {}", e)))?;

    Ok(Json(json!({ "token": token, "message": "Signin Successful" })))
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid credentials")
}
