use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::database::manager::DatabaseManager;
use crate::middleware::require_auth;

pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(user_public_routes())
        // Protected
        .merge(user_protected_routes())
        .merge(todo_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn user_public_routes() -> Router {
    use crate::handlers::public::users;

    Router::new()
        .route("/users/signup", post(users::signup_post))
        .route("/users/signin", post(users::signin_post))
}

fn user_protected_routes() -> Router {
    use crate::handlers::protected::users;

    Router::new()
        .route(
            "/users/profile",
            get(users::profile_get).put(users::profile_put),
        )
        .route("/users/account", delete(users::account_delete))
        .route_layer(middleware::from_fn(require_auth))
}

fn todo_routes() -> Router {
    use crate::handlers::protected::todos;

    Router::new()
        .route("/todos", post(todos::todos_post).get(todos::todos_get))
        .route(
            "/todos/:id",
            get(todos::todo_get)
                .put(todos::todo_put)
                .delete(todos::todo_delete),
        )
        .route_layer(middleware::from_fn(require_auth))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Taskpad API",
        "version": version,
        "status": "ok",
        "endpoints": {
            "signup": "POST /users/signup (public, multipart)",
            "signin": "POST /users/signin (public)",
            "profile": "GET|PUT /users/profile (bearer)",
            "account": "DELETE /users/account (bearer)",
            "todos": "POST|GET /todos, GET|PUT|DELETE /todos/:id (bearer)",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "error": "database unavailable",
                "database_error": e.to_string()
            })),
        ),
    }
}

pub async fn run() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();

    // Bring the schema up before serving; a missing database degrades
    // /health instead of aborting startup.
    match DatabaseManager::migrate().await {
        Ok(_) => tracing::info!("database migrations applied"),
        Err(e) => tracing::error!("database not ready at startup: {}", e),
    }

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    println!("Taskpad API listening on http://{}", bind_addr);

    axum::serve(listener, app()).await?;
    Ok(())
}
