// HTTP server setup (Axum + embedded admin UI)
pub mod app;
pub mod error;
pub mod routes;
pub mod static_files;

pub use app::*;
pub use error::{ApiError, ApiResult};
