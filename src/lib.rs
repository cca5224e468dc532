use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::{Map, Value};
use slog::Logger;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::{AuthRouterExt, AuthService};
use crate::entities::user::UserRole;

pub mod auth;
pub mod commands;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod middleware_helpers;
pub mod migrator;
pub mod services;
pub mod tracing;

pub use errors::{ErrorCode, ServiceError};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig, logger: &Logger) -> Self {
        let auth = Arc::new(AuthService::new(auth::AuthConfig::from(&config)));
        let services = handlers::AppServices::new(db.clone(), logger);
        Self {
            db,
            config,
            services,
            auth,
        }
    }
}

/// Success codes carried in the envelope's `messages` list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SuccessMessage {
    GetProductsSuccess,
    AddProductSuccess,
    UpdateProductSuccess,
    GetCategoriesSuccess,
    AddCategorySuccess,
    GetSuppliersSuccess,
    AddSupplierSuccess,
    GetWorkSchedulesSuccess,
    AddWorkScheduleSuccess,
    GetWorkShiftsSuccess,
    AddWorkShiftSuccess,
    AddWorkAssignmentSuccess,
    GetImportingRequestsSuccess,
    CreateImportingRequestSuccess,
    AcceptImportingRequestsSuccess,
    CancelImportingRequestSuccess,
}

/// Uniform response envelope: `{ status, data?, errors?, messages? }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: SuccessMessage) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            data: Some(data),
            errors: None,
            messages: Some(vec![message.to_string()]),
        }
    }

    pub fn failure(status: StatusCode, errors: Vec<String>) -> Self {
        Self {
            status: status.as_u16(),
            data: None,
            errors: Some(errors),
            messages: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

pub type ApiResult<T = Value> = Result<ApiResponse<T>, ServiceError>;

/// Wraps a payload under its entity key, e.g. `{ "product": {...} }`
pub fn keyed<T: Serialize>(key: &str, value: T) -> Result<Value, ServiceError> {
    let value = serde_json::to_value(value).map_err(|e| ServiceError::Other(e.into()))?;
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Ok(Value::Object(map))
}

/// Versioned business routes; every route requires a bearer token.
pub fn api_v1_routes() -> Router<AppState> {
    let any_actor = Router::new()
        .route("/products", get(handlers::products::get_products))
        .route("/products/:id", put(handlers::products::update_product))
        .route("/categories", get(handlers::categories::get_categories))
        .route("/suppliers", get(handlers::suppliers::get_suppliers))
        .route(
            "/work-schedules",
            get(handlers::work_schedules::get_work_schedules),
        )
        .route("/work-shifts", get(handlers::work_shifts::get_work_shifts))
        .route(
            "/work-assignments",
            post(handlers::work_assignments::add_work_assignment),
        )
        .with_auth();

    let manager_only = Router::new()
        .route("/products", post(handlers::products::add_product))
        .route("/categories", post(handlers::categories::add_category))
        .route("/suppliers", post(handlers::suppliers::add_supplier))
        .route(
            "/work-schedules",
            post(handlers::work_schedules::add_work_schedule),
        )
        .route("/work-shifts", post(handlers::work_shifts::add_work_shift))
        .route(
            "/importing-requests",
            get(handlers::importing_requests::get_importing_requests)
                .put(handlers::importing_requests::accept_importing_requests),
        )
        .route(
            "/importing-requests/:id",
            axum::routing::delete(handlers::importing_requests::cancel_importing_request),
        )
        .with_role(UserRole::Manager);

    let cashier_only = Router::new()
        .route(
            "/importing-requests",
            post(handlers::importing_requests::create_importing_request),
        )
        .with_role(UserRole::Cashier);

    Router::new()
        .merge(any_actor)
        .merge(manager_only)
        .merge(cashier_only)
        .route("/status", get(api_status))
        .route("/health", get(health_check))
}

/// Full application router with the layer stack shared by the binary and tests
pub fn app_router(state: AppState) -> Router {
    let cors = build_cors(&state.config);
    let auth = state.auth.clone();

    Router::new()
        .route("/", get(root))
        .route("/metrics", get(metrics::metrics_handler))
        .nest("/api/v1", api_v1_routes())
        .with_state(state)
        .layer(axum::Extension(auth))
        .layer(crate::tracing::configure_http_tracing())
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id_middleware,
        ))
        .layer(cors)
}

fn build_cors(config: &config::AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins()
        .into_iter()
        .filter_map(|origin| HeaderValue::from_str(&origin).ok())
        .collect();

    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() {
        if config.is_development() {
            base.allow_origin(Any)
        } else {
            base
        }
    } else {
        base.allow_origin(origins)
    }
}

async fn root() -> &'static str {
    "Retail store API is running"
}

async fn api_status() -> Json<Value> {
    let mut body = Map::new();
    body.insert("status".into(), Value::from("ok"));
    body.insert("service".into(), Value::from(env!("CARGO_PKG_NAME")));
    body.insert("version".into(), Value::from(env!("CARGO_PKG_VERSION")));
    Json(Value::Object(body))
}

async fn health_check(State(state): State<AppState>) -> Response {
    let healthy = db::check_connection(&state.db).await.is_ok();
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let mut checks = Map::new();
    checks.insert(
        "database".into(),
        Value::from(if healthy { "healthy" } else { "unhealthy" }),
    );
    let mut body = Map::new();
    body.insert(
        "status".into(),
        Value::from(if healthy { "healthy" } else { "unhealthy" }),
    );
    body.insert("checks".into(), Value::Object(checks));
    body.insert("timestamp".into(), Value::from(chrono::Utc::now().to_rfc3339()));

    (status, Json(Value::Object(body))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_omits_absent_sections() {
        let ok = ApiResponse::ok(Value::from(1), SuccessMessage::AddProductSuccess);
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value["status"], 200);
        assert_eq!(value["messages"][0], "ADD_PRODUCT_SUCCESS");
        assert!(value.get("errors").is_none());

        let failure = ApiResponse::<()>::failure(StatusCode::NOT_FOUND, vec!["X".into()]);
        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value["status"], 404);
        assert!(value.get("data").is_none());
        assert!(value.get("messages").is_none());
    }

    #[test]
    fn keyed_wraps_value() {
        let value = keyed("workSchedules", vec![1, 2]).unwrap();
        assert_eq!(value["workSchedules"][1], 2);
    }
}
