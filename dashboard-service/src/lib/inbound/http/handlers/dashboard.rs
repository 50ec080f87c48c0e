use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::Local;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::system::models::SystemInfo;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<DashboardQuery>,
) -> Result<ApiSuccess<DashboardResponseData>, ApiError> {
    let info = state.system_info.system_info().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DashboardResponseData {
            username: user.username,
            info,
            message: query.message.filter(|m| !m.is_empty()),
            message_type: query.message_type.filter(|t| !t.is_empty()),
            current_page: "main".to_string(),
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        },
    ))
}

/// Flash message passed back to the dashboard after a redirect
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    message: Option<String>,
    message_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardResponseData {
    pub username: String,
    pub info: SystemInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    pub current_page: String,
    pub timestamp: String,
}
