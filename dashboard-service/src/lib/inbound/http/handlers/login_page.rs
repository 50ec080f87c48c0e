use axum::extract::State;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use crate::inbound::http::cookies::session_token;
use crate::inbound::http::router::AppState;

const LOGIN_PAGE: &str = include_str!("../../../../../static/login.html");

/// Serves the login form, or sends an already logged-in caller home.
pub async fn login_page(State(state): State<AppState>, jar: CookieJar) -> Response {
    let logged_in = session_token(&jar)
        .and_then(|token| state.authenticator.validate_session(&token))
        .is_some();

    if logged_in {
        return Redirect::to("/").into_response();
    }

    Html(LOGIN_PAGE).into_response()
}
