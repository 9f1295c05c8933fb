use axum::{extract::Multipart, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::auth;
use crate::database::accounts::{self, NewAccount};
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::services::{image_service, mail_service};
use crate::validation;

/// POST /users/signup - register a new account
///
/// Multipart body: username, email, password, and an optional profile_pic.
/// The picture is forwarded to the external image host; if that upload fails
/// the registration still succeeds without a picture. A welcome email is
/// dispatched as a detached task once the account exists.
pub async fn signup_post(mut multipart: Multipart) -> Result<(StatusCode, Json<Value>), ApiError> {
    let form = SignupForm::read(&mut multipart).await?;

    validation::validate_signup(&form.username, &form.email, &form.password)
        .map_err(ApiError::validation)?;

    let username = form.username.trim().to_string();
    let email = form.email.trim().to_lowercase();

    let pool = DatabaseManager::pool().await?;
    if let Some(existing) = accounts::find_by_email_or_username(&pool, &email, &username).await? {
        if existing.email == email {
            return Err(ApiError::conflict("Email already exists."));
        }
        return Err(ApiError::conflict("Username already taken."));
    }

    let mut profile_pic = String::new();
    if let Some(image) = form.profile_pic {
        match image_service::upload_profile_pic(&image).await {
            Ok(url) => profile_pic = url,
            Err(e) => tracing::warn!("profile picture upload failed, continuing signup: {}", e),
        }
    }

    // bcrypt is CPU-bound; keep it off the request threads.
    let password = form.password;
    let password_hash = tokio::task::spawn_blocking(move || auth::hash_password(&password))
        .await
        .map_err(|e| ApiError::internal(format!("hashing task failed: {}", e)))?
        .map_err(|e| ApiError::internal(format!("password hashing failed: {}", e)))?;

    accounts::insert(
        &pool,
        NewAccount {
            username: username.clone(),
            email: email.clone(),
            password_hash,
            profile_pic,
        },
    )
    .await?;

    mail_service::spawn_welcome_email(email, username);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User Registered Successfully." })),
    ))
}

struct SignupForm {
    username: String,
    email: String,
    password: String,
    profile_pic: Option<Vec<u8>>,
}

impl SignupForm {
    async fn read(multipart: &mut Multipart) -> Result<Self, ApiError> {
        let mut form = SignupForm {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            profile_pic: None,
        };

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::validation(format!("Malformed multipart body: {}", e)))?
        {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("username") => form.username = read_text(field).await?,
                Some("email") => form.email = read_text(field).await?,
                Some("password") => form.password = read_text(field).await?,
                Some("profile_pic") => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::validation(format!("Malformed upload: {}", e)))?;
                    if !bytes.is_empty() {
                        form.profile_pic = Some(bytes.to_vec());
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::validation(format!("Malformed multipart body: {}", e)))
}
