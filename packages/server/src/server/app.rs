//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    create_student_handler, delete_student_handler, get_student_handler,
    get_student_image_handler, health_handler, list_students_handler, student_options_handler,
    update_student_handler,
};
use crate::server::static_files::serve_admin;

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: Arc<ServerDeps>,
    pub max_upload_bytes: usize,
}

/// HTTP-level settings that do not belong to the domain.
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Empty allows any origin.
    pub allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, options: AppOptions) -> Router {
    let app_state = AxumAppState {
        deps: Arc::new(deps),
        max_upload_bytes: options.max_upload_bytes,
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin(&options.allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        // Student records
        .route("/students/", post(create_student_handler))
        .route("/studentlist/", get(list_students_handler))
        .route("/studentoptions/", get(student_options_handler))
        .route(
            "/students/:id",
            get(get_student_handler).put(update_student_handler),
        )
        .route("/students/:id/image", get(get_student_image_handler))
        .route("/studentdelete/:id", delete(delete_student_handler))
        // Health check
        .route("/health", get(health_handler))
        // Admin UI
        .route("/", get(serve_admin))
        .route("/admin", get(serve_admin))
        .route("/admin/*path", get(serve_admin))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(DefaultBodyLimit::max(options.max_upload_bytes))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn allow_origin(origins: &[String]) -> AllowOrigin {
    if origins.is_empty() {
        return Any.into();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}
