use auth::AuthRequest;
use auth::AuthenticationError;
use auth::BasicCredentials;
use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::Authorization;
use axum_extra::headers::HeaderMapExt;

use crate::inbound::http::cookies::session_cookie;
use crate::inbound::http::cookies::session_token;
use crate::inbound::http::cookies::sets_session_cookie;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::inbound::http::router::LOGIN_PATH;

/// Extension type to store the authenticated identity in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
    /// Token of the session backing this request, existing or just issued
    pub session_token: Option<String>,
}

/// Route guard for protected endpoints.
///
/// Resolves the caller from the session cookie, falling back to HTTP basic
/// credentials. A session issued from basic credentials is delivered as a
/// cookie on the handler's response. Callers presenting nothing are sent to
/// the login page; callers presenting wrong credentials get 401.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let jar = CookieJar::from_headers(req.headers());
    let auth_request = AuthRequest::new()
        .with_session_token(session_token(&jar))
        .with_basic(basic_credentials(req.headers()));

    let result = state
        .authenticator
        .authenticate(&auth_request)
        .map_err(reject)?;

    let token = result
        .issued_session
        .as_ref()
        .map(|session| session.token.to_string())
        .or(auth_request.session_token);

    req.extensions_mut().insert(AuthenticatedUser {
        username: result.username,
        session_token: token,
    });

    let response = next.run(req).await;

    match result.issued_session {
        // A handler that sets the session cookie itself (logout) has the last word
        Some(_) if sets_session_cookie(response.headers()) => Ok(response),
        Some(session) => {
            let cookie = session_cookie(
                session.token.as_str(),
                state.authenticator.session_ttl(),
                state.secure_cookie,
            );
            Ok((CookieJar::new().add(cookie), response).into_response())
        }
        None => Ok(response),
    }
}

fn reject(err: AuthenticationError) -> Response {
    match err {
        AuthenticationError::AuthenticationRequired => {
            tracing::debug!("No session or credentials, redirecting to login");
            Redirect::to(LOGIN_PATH).into_response()
        }
        other => ApiError::Unauthorized(other.to_string()).into_response(),
    }
}

/// Credentials from an `Authorization: Basic` header. Malformed or
/// non-basic headers count as absent.
fn basic_credentials(headers: &HeaderMap) -> Option<BasicCredentials> {
    headers
        .typed_get::<Authorization<Basic>>()
        .map(|Authorization(basic)| BasicCredentials::new(basic.username(), basic.password()))
}
