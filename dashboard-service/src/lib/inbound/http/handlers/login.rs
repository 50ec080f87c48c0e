use auth::AuthenticationError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde::Serialize;

use crate::inbound::http::cookies::session_cookie;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponseBody>), (StatusCode, Json<LoginResponseBody>)> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(status = rejection.status().as_u16(), "Malformed login body");
        (
            StatusCode::BAD_REQUEST,
            Json(LoginResponseBody::failure(rejection.body_text())),
        )
    })?;

    let session = state
        .authenticator
        .login(&body.username, &body.password)
        .map_err(|e| {
            let status = match e {
                AuthenticationError::MissingFields => StatusCode::BAD_REQUEST,
                _ => StatusCode::UNAUTHORIZED,
            };
            (status, Json(LoginResponseBody::failure(e.to_string())))
        })?;

    let cookie = session_cookie(
        session.token.as_str(),
        state.authenticator.session_ttl(),
        state.secure_cookie,
    );

    Ok((jar.add(cookie), Json(LoginResponseBody::success())))
}

/// Login form payload. Missing fields are treated as empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseBody {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginResponseBody {
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
        }
    }
}
