//! Data-access layer for consumers of the HTTP API (the companion CLI and
//! integration tests). Wraps outbound calls, attaches the stored bearer
//! token, and normalizes error shapes so callers never deal with raw
//! responses.

use serde_json::Value;

/// Callback invoked when the server rejects the stored token. Injected at
/// construction so the transport layer stays decoupled from whatever
/// notification/navigation scheme the consumer uses.
pub type UnauthorizedHandler = Box<dyn Fn() + Send + Sync>;

#[derive(Debug)]
pub struct ClientError {
    /// HTTP status, or 0 for network-level failures.
    pub status: u16,
    pub message: String,
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ClientError {}

pub type ClientResult<T> = Result<T, ClientError>;

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
    on_unauthorized: Option<UnauthorizedHandler>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
            token: None,
            on_unauthorized: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_unauthorized_handler(mut self, handler: UnauthorizedHandler) -> Self {
        self.on_unauthorized = Some(handler);
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&mut self, path: &str) -> ClientResult<Value> {
        let request = self.http.get(self.url(path));
        self.execute(request).await
    }

    pub async fn get_query(&mut self, path: &str, query: &[(&str, String)]) -> ClientResult<Value> {
        let request = self.http.get(self.url(path)).query(query);
        self.execute(request).await
    }

    pub async fn post_json(&mut self, path: &str, body: &Value) -> ClientResult<Value> {
        let request = self.http.post(self.url(path)).json(body);
        self.execute(request).await
    }

    pub async fn put_json(&mut self, path: &str, body: &Value) -> ClientResult<Value> {
        let request = self.http.put(self.url(path)).json(body);
        self.execute(request).await
    }

    pub async fn delete(&mut self, path: &str) -> ClientResult<Value> {
        let request = self.http.delete(self.url(path));
        self.execute(request).await
    }

    pub async fn post_multipart(
        &mut self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<Value> {
        let request = self.http.post(self.url(path)).multipart(form);
        self.execute(request).await
    }

    pub async fn put_multipart(
        &mut self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<Value> {
        let request = self.http.put(self.url(path)).multipart(form);
        self.execute(request).await
    }

    async fn execute(&mut self, request: reqwest::RequestBuilder) -> ClientResult<Value> {
        let had_token = self.token.is_some();
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| ClientError {
            status: 0,
            message: format!("Network error: {}", e),
        })?;

        let status = response.status();

        // A 401 on an authenticated call means the stored token is no longer
        // good: drop it and let the consumer react. A 401 on an
        // unauthenticated call (bad signin) is an ordinary error.
        if status == reqwest::StatusCode::UNAUTHORIZED && had_token {
            self.clear_token();
            if let Some(handler) = &self.on_unauthorized {
                handler();
            }
            return Err(ClientError {
                status: 401,
                message: "Session expired. Please login again.".to_string(),
            });
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(ClientError {
                status: status.as_u16(),
                message: error_message(&body).to_string(),
            });
        }

        Ok(body)
    }
}

/// Pull the server's message out of an error body, whatever its shape.
fn error_message(body: &Value) -> &str {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(Value::as_str)
        .unwrap_or("Request failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_message_prefers_message_field() {
        assert_eq!(error_message(&json!({ "message": "Title is required." })), "Title is required.");
        assert_eq!(error_message(&json!({ "error": "Internal server error" })), "Internal server error");
        assert_eq!(error_message(&json!({})), "Request failed");
        assert_eq!(error_message(&Value::Null), "Request failed");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.url("/todos"), "http://localhost:5000/todos");
    }
}
