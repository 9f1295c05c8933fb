use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, TokenError};
use crate::database::{accounts, manager::DatabaseManager, models::Account};
use crate::error::ApiError;

/// The resolved account attached to the request after the gate passes.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Account);

/// Authentication gate. Resolves the bearer token to an account and attaches
/// it to the request, or rejects with 401. Failure is terminal for the
/// request; the wrapped handler never runs.
pub async fn require_auth(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&headers)?;

    let claims = auth::decode_token(&token).map_err(|e| match e {
        TokenError::Expired => ApiError::unauthorized("Token expired"),
        TokenError::Invalid => ApiError::unauthorized("Invalid token"),
        TokenError::SecretMissing => ApiError::internal("JWT secret not configured"),
    })?;

    let pool = DatabaseManager::pool().await?;
    let account = accounts::find_by_id(&pool, claims.user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Account not found"))?;

    request.extensions_mut().insert(CurrentUser(account));

    Ok(next.run(request).await)
}

/// Extract the token from the Authorization header
fn bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        Some(_) => Err(ApiError::unauthorized("Empty bearer token")),
        None => Err(ApiError::unauthorized(
            "Authorization header must use Bearer token format",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_rejected() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let err = bearer_token(&headers_with("Basic dXNlcjpwYXNz")).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn empty_token_is_rejected() {
        let err = bearer_token(&headers_with("Bearer   ")).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn bearer_token_is_extracted() {
        let token = bearer_token(&headers_with("Bearer abc.def.ghi")).unwrap();
        assert_eq!(token, "abc.def.ghi");
    }
}
