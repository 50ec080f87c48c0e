use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::system::models::SystemInfo;
use crate::inbound::http::router::AppState;

pub async fn system_info(
    State(state): State<AppState>,
) -> Result<ApiSuccess<SystemInfo>, ApiError> {
    state
        .system_info
        .system_info()
        .await
        .map_err(ApiError::from)
        .map(|info| ApiSuccess::new(StatusCode::OK, info))
}
