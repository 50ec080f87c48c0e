use axum::http::header;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_id";

/// Cookie delivering a freshly issued session token.
///
/// # Arguments
/// * `token` - Session token
/// * `max_age` - Session lifetime
/// * `secure` - Restrict the cookie to encrypted transport
pub fn session_cookie(token: &str, max_age: chrono::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(max_age.num_seconds()))
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Empty, already expired session cookie. Clears the client's session
/// cookie whether or not the request carried one.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::ZERO)
        .same_site(SameSite::Lax)
        .build()
}

/// True when the response already sets the session cookie.
pub fn sets_session_cookie(headers: &HeaderMap) -> bool {
    let prefix = format!("{}=", SESSION_COOKIE);
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.starts_with(&prefix))
}

/// Session token sent by the client, if any.
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}
