use axum::{extract::Multipart, Extension, Json};
use serde_json::{json, Value};

use crate::database::accounts;
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::services::image_service;
use crate::validation;

/// PUT /users/profile - partial update of username and/or profile picture
///
/// An image-host failure leaves the picture unchanged; the rest of the
/// update still applies.
pub async fn profile_put(
    Extension(CurrentUser(account)): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut username: Option<String> = None;
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("username") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::validation(format!("Malformed multipart body: {}", e)))?;
                if !value.trim().is_empty() {
                    username = Some(value.trim().to_string());
                }
            }
            Some("profile_pic") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(format!("Malformed upload: {}", e)))?;
                if !bytes.is_empty() {
                    image = Some(bytes.to_vec());
                }
            }
            _ => {}
        }
    }

    if let Some(name) = &username {
        validation::validate_username(name).map_err(ApiError::validation)?;
    }

    let mut profile_pic: Option<String> = None;
    if let Some(image) = image {
        match image_service::upload_profile_pic(&image).await {
            Ok(url) => profile_pic = Some(url),
            Err(e) => tracing::warn!("profile picture upload failed, field left unchanged: {}", e),
        }
    }

    let pool = DatabaseManager::pool().await?;
    let updated = accounts::update_profile(
        &pool,
        account.id,
        username.as_deref(),
        profile_pic.as_deref(),
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Account not found"))?;

    Ok(Json(json!({
        "message": "Profile updated successfully.",
        "user": updated.public_profile(),
    })))
}
