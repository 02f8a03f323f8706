use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AxumAppState;

const STORE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    store: StoreHealth,
    face_detection: bool,
}

#[derive(Serialize)]
pub struct StoreHealth {
    backend: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    students: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Checks store connectivity and reports the record count.
///
/// Returns 200 OK if the store answers, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AxumAppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let store = &state.deps.store;

    let check = async {
        store.ping().await?;
        store.count().await
    };

    let store_health = match tokio::time::timeout(STORE_CHECK_TIMEOUT, check).await {
        Ok(Ok(count)) => StoreHealth {
            backend: store.backend().to_string(),
            status: "ok".to_string(),
            students: Some(count),
            error: None,
        },
        Ok(Err(e)) => StoreHealth {
            backend: store.backend().to_string(),
            status: "error".to_string(),
            students: None,
            error: Some(format!("Store check failed: {}", e)),
        },
        Err(_) => StoreHealth {
            backend: store.backend().to_string(),
            status: "error".to_string(),
            students: None,
            error: Some("Store check timeout (>5s)".to_string()),
        },
    };

    let is_healthy = store_health.status == "ok";

    let overall_status = if is_healthy {
        "healthy"
    } else {
        "unhealthy"
    };

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall_status.to_string(),
            store: store_health,
            face_detection: state.deps.face_detector.is_some(),
        }),
    )
}
