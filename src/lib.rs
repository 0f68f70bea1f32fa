use axum::{
    extract::Request,
    http::{HeaderValue, Method, StatusCode},
    middleware::from_fn,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use services::chat::ChatClient;

/// Shared application state: one connection pool and one long-lived chat
/// client handle, both created at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub chat: Option<ChatClient>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health::check))
        .merge(public_routes())
        .merge(account_routes())
        .merge(staff_routes())
        .merge(admin_routes())
        .fallback(route_not_found)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Routes reachable without a token. Support/quote submission and the chat
/// endpoints run under optional auth so a logged-in caller gets their
/// ticket linked to their account.
fn public_routes() -> Router<AppState> {
    use handlers::{admins, chat, employees, news, products, quotes, support, users};

    Router::new()
        .route("/api/auth/register", post(users::register))
        .route("/api/auth/login", post(users::login))
        .route("/api/employees/register", post(employees::register))
        .route("/api/employees/login", post(employees::login))
        .route("/api/admin/login", post(admins::login))
        .route("/api/products", get(products::list))
        .route("/api/products/:id", get(products::get))
        .route("/api/services", get(handlers::services::list))
        .route("/api/services/:id", get(handlers::services::get))
        .route("/api/news", get(news::list))
        .route("/api/news/:id", get(news::get))
        .route("/api/quotes", post(quotes::create))
        .merge(
            Router::new()
                .route("/api/support", post(support::create))
                .route("/api/chat", post(chat::message))
                .route("/api/chat/support", post(chat::support_request))
                .route_layer(from_fn(middleware::auth::optional_auth)),
        )
}

/// Routes for any authenticated principal.
fn account_routes() -> Router<AppState> {
    use handlers::{orders, support, users};

    Router::new()
        .route("/api/auth/profile", get(users::profile))
        .route("/api/auth/email", put(users::update_email))
        .route("/api/auth/phone", put(users::update_phone))
        .route("/api/orders", post(orders::create).get(orders::list_own))
        .route("/api/support/mine", get(support::list_own_interactions))
        .route_layer(from_fn(middleware::auth::require_auth))
}

/// Back-office routes, restricted to employees holding the admin role.
fn staff_routes() -> Router<AppState> {
    use handlers::{employees, news, orders, products, quotes, support, users};

    Router::new()
        .route("/api/users", get(users::list))
        .route("/api/employees", get(employees::list))
        .route("/api/products", post(products::create))
        .route(
            "/api/products/:id",
            put(products::update).delete(products::remove),
        )
        .route("/api/services", post(handlers::services::create))
        .route(
            "/api/services/:id",
            put(handlers::services::update).delete(handlers::services::remove),
        )
        .route("/api/news", post(news::create))
        .route("/api/news/:id", put(news::update).delete(news::remove))
        .route("/api/staff/orders", get(orders::list_all))
        .route("/api/orders/:id/status", put(orders::update_status))
        .route("/api/orders/:id", delete(orders::remove))
        .route("/api/support", get(support::list))
        .route("/api/support/:id", get(support::get).delete(support::remove))
        .route("/api/support/:id/status", put(support::update_status))
        .route("/api/quotes", get(quotes::list))
        .route("/api/quotes/:id", get(quotes::get).delete(quotes::remove))
        .route("/api/quotes/:id/status", put(quotes::update_status))
        .route_layer(from_fn(middleware::auth::require_staff))
        .route_layer(from_fn(middleware::auth::require_auth))
}

/// Administrator account management, restricted to the privileged
/// principal type.
fn admin_routes() -> Router<AppState> {
    use handlers::admins;

    Router::new()
        .route("/api/admin/dashboard", get(admins::dashboard))
        .route("/api/admin/accounts", post(admins::create))
        .route("/api/admin/accounts/:id", delete(admins::remove))
        .route_layer(from_fn(middleware::auth::require_admin))
        .route_layer(from_fn(middleware::auth::require_auth))
}

fn cors_layer() -> CorsLayer {
    let cfg = config::config();

    let origin = cfg
        .security
        .cors_origin
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:5173"));

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::ORIGIN,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Storefront API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/api/auth/* (register, login, profile, email, phone)",
            "catalog": "/api/products, /api/services, /api/news (public reads)",
            "orders": "/api/orders (authenticated)",
            "support": "/api/support, /api/quotes, /api/chat",
            "staff": "catalog writes, /api/users, /api/staff/orders (admin role)",
            "admin": "/api/admin/* (administrator accounts)",
        }
    }))
}

/// Echo the attempted method and path so misrouted frontend calls are easy
/// to spot in the wild.
async fn route_not_found(req: Request) -> (StatusCode, Json<Value>) {
    tracing::debug!(method = %req.method(), path = %req.uri().path(), "route not found");

    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": true,
            "message": "route not found",
            "requested_path": req.uri().path().to_string(),
            "method": req.method().as_str(),
        })),
    )
}
