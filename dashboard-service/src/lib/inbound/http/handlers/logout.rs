use axum::extract::State;
use axum::response::Redirect;
use axum::Extension;
use axum_extra::extract::cookie::CookieJar;

use crate::inbound::http::cookies::removal_cookie;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::router::LOGIN_PATH;

pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    state.authenticator.logout(user.session_token.as_deref());
    tracing::info!(username = %user.username, "User logged out");

    (jar.add(removal_cookie()), Redirect::to(LOGIN_PATH))
}
