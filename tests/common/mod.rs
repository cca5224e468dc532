#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use retail_store_api::{
    app_router,
    commands::users::CreateUserCommand,
    config::AppConfig,
    db::{self, DbConfig},
    entities::user::{self, UserRole},
    logging, AppState,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration_test_signing_secret_0123456789abcdef";

/// An authenticated actor seeded into the test store
#[derive(Clone)]
pub struct Actor {
    pub user: user::Model,
    pub token: String,
}

impl Actor {
    pub fn id(&self) -> Uuid {
        self.user.id
    }
}

/// Helper harness for driving the full router against an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub manager: Actor,
    pub cashier: Actor,
    pub importer: Actor,
}

/// Decoded response: status plus the JSON envelope
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// First entry of the envelope's `errors` list
    pub fn error_code(&self) -> Option<&str> {
        self.body["errors"].get(0).and_then(Value::as_str)
    }

    pub fn message(&self) -> Option<&str> {
        self.body["messages"].get(0).and_then(Value::as_str)
    }

    pub fn data(&self, key: &str) -> &Value {
        &self.body["data"][key]
    }
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            TEST_JWT_SECRET.to_string(),
            3600,
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // A single connection keeps every query on the same in-memory database.
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_with_config(&DbConfig::from(&cfg))
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let logger = logging::discard_logger();
        let state = AppState::new(Arc::new(pool), cfg, &logger);
        let router = app_router(state.clone());

        let manager = register_actor(&state, "manager@store.test", UserRole::Manager).await;
        let cashier = register_actor(&state, "cashier@store.test", UserRole::Cashier).await;
        let importer = register_actor(&state, "importer@store.test", UserRole::Importer).await;

        Self {
            router,
            state,
            manager,
            cashier,
            importer,
        }
    }

    /// Registers a user and mints a token carrying the stored role
    pub async fn seed_actor(&self, email: &str, role: UserRole) -> Actor {
        register_actor(&self.state, email, role).await
    }

    /// Token for an arbitrary (possibly unregistered) subject
    pub fn token_for(&self, user_id: Uuid, role: UserRole) -> String {
        self.state
            .auth
            .issue_token(user_id, role)
            .expect("issue token")
    }

    pub async fn raw(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self.raw(request).await;
        let status = response.status();
        let body = response_json(response).await;
        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, actor: &Actor) -> TestResponse {
        self.request(Method::GET, uri, Some(&actor.token), None).await
    }

    pub async fn post(&self, uri: &str, actor: &Actor, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(&actor.token), Some(body))
            .await
    }

    pub async fn put(&self, uri: &str, actor: &Actor, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(&actor.token), Some(body))
            .await
    }

    pub async fn delete(&self, uri: &str, actor: &Actor) -> TestResponse {
        self.request(Method::DELETE, uri, Some(&actor.token), None)
            .await
    }

    /// Creates a category and a supplier, returning their ids
    pub async fn seed_catalog(&self) -> (String, String) {
        let category = self
            .post(
                "/api/v1/categories",
                &self.manager,
                serde_json::json!({ "name": "Beverages" }),
            )
            .await;
        assert_eq!(category.status, StatusCode::OK, "{}", category.body);
        let supplier = self
            .post(
                "/api/v1/suppliers",
                &self.manager,
                serde_json::json!({ "name": "Acme Wholesale", "phone": "555-0100" }),
            )
            .await;
        assert_eq!(supplier.status, StatusCode::OK, "{}", supplier.body);

        (
            id_of(category.data("category")),
            id_of(supplier.data("supplier")),
        )
    }

    /// Creates a product under a fresh catalog and returns its id
    pub async fn seed_product(&self, name: &str) -> String {
        let (category_id, supplier_id) = self.seed_catalog().await;
        let product = self
            .post(
                "/api/v1/products",
                &self.manager,
                serde_json::json!({
                    "name": name,
                    "price": 12.5,
                    "availableQuantity": 4,
                    "categoryId": category_id,
                    "supplierId": supplier_id,
                }),
            )
            .await;
        assert_eq!(product.status, StatusCode::OK, "{}", product.body);
        id_of(product.data("product"))
    }
}

pub fn id_of(value: &Value) -> String {
    value["id"]
        .as_str()
        .expect("entity carries an id")
        .to_string()
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
}

async fn register_actor(state: &AppState, email: &str, role: UserRole) -> Actor {
    let user = state
        .services
        .users
        .create_user(CreateUserCommand {
            email: email.to_string(),
            fullname: format!("{} user", role),
            avatar: None,
            role,
        })
        .await
        .expect("seed user");
    let token = state
        .auth
        .issue_token(user.id, role)
        .expect("issue token");
    Actor { user, token }
}
