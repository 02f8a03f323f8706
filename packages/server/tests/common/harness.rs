//! Test harness for integration testing.
//!
//! In-memory and SQLite stores need no infrastructure and back most tests.
//! Postgres tests share one testcontainers instance: the container starts and
//! migrations run on the first test, later tests reuse it.

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use students_core::kernel::{
    MockFaceDetector, PostgresStudentStore, ServerDeps, SqliteStudentStore, TestDependencies,
};
use students_core::server::{build_app, AppOptions};
use students_core::domains::students::StudentRules;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use tower::ServiceExt;

/// Install a test-writer subscriber once per binary.
/// Run tests with: RUST_LOG=debug cargo test -- --nocapture
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Router harness
// =============================================================================

/// A router wired to in-memory dependencies, plus handles to inspect them.
pub struct TestApp {
    pub router: Router,
    pub deps: TestDependencies,
}

impl TestApp {
    /// Router over an empty in-memory store with the face gate off.
    pub fn new() -> Self {
        Self::with_deps(TestDependencies::new())
    }

    /// Router with the face gate backed by `detector`.
    pub fn with_faces(detector: MockFaceDetector) -> Self {
        Self::with_deps(TestDependencies::new().mock_faces(detector))
    }

    pub fn with_rules(rules: StudentRules) -> Self {
        Self::with_deps(TestDependencies::new().rules(rules))
    }

    pub fn with_deps(deps: TestDependencies) -> Self {
        init_tracing();
        let router = build_app(deps.clone().into_server_deps(), AppOptions::default());
        Self { router, deps }
    }

    /// Router over an explicit set of server dependencies.
    pub fn from_server_deps(server_deps: ServerDeps, options: AppOptions) -> Router {
        init_tracing();
        build_app(server_deps, options)
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        send(&self.router, request).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&self, uri: &str, form: super::MultipartForm) -> TestResponse {
        self.send(form.into_request("POST", uri)).await
    }

    pub async fn put_form(&self, uri: &str, form: super::MultipartForm) -> TestResponse {
        self.send(form.into_request("PUT", uri)).await
    }

    /// Create a student through the API and return its id.
    pub async fn create(&self, form: super::MultipartForm) -> i64 {
        let response = self.post_form("/students/", form).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        response.json()["id"].as_i64().expect("id in create response")
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive one request through the router.
pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let content_type = response
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body")
        .to_vec();

    TestResponse {
        status,
        content_type,
        body,
    }
}

/// Buffered response for assertions.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("JSON body")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The `detail` reason of an error body.
    pub fn detail(&self) -> String {
        self.json()["detail"]
            .as_str()
            .expect("detail in error body")
            .to_string()
    }
}

// =============================================================================
// SQLite
// =============================================================================

/// A fresh private in-memory SQLite store.
pub async fn sqlite_store() -> Arc<SqliteStudentStore> {
    init_tracing();
    Arc::new(
        SqliteStudentStore::in_memory()
            .await
            .expect("Failed to open in-memory SQLite store"),
    )
}

// =============================================================================
// Postgres (testcontainers)
// =============================================================================

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        init_tracing();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        // Connecting once runs the migrations on the shared database
        PostgresStudentStore::connect(&db_url, 1)
            .await
            .context("Failed to migrate test database")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Postgres-backed harness. Tests share one database, so assertions must
/// only concern the rows a test created itself.
///
/// ```ignore
/// #[test_context(PostgresHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &PostgresHarness) {
///     let student = ctx.store.insert(&fields).await.unwrap();
/// }
/// ```
pub struct PostgresHarness {
    pub store: Arc<PostgresStudentStore>,
}

impl AsyncTestContext for PostgresHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }
}

impl PostgresHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;
        let store = PostgresStudentStore::connect(&infra.db_url, 5)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self {
            store: Arc::new(store),
        })
    }
}
