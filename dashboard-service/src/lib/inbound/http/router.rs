use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::InMemorySessionStore;
use auth::StaticCredentialStore;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::dashboard::dashboard;
use super::handlers::login::login;
use super::handlers::login_page::login_page;
use super::handlers::logout::logout;
use super::handlers::system_info::system_info;
use super::middleware::require_session;
use crate::domain::system::ports::SystemInfoServicePort;

pub const LOGIN_PATH: &str = "/login";

pub type DashboardAuthenticator = Authenticator<StaticCredentialStore, InMemorySessionStore>;

#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<DashboardAuthenticator>,
    pub system_info: Arc<dyn SystemInfoServicePort>,
    pub secure_cookie: bool,
}

pub fn create_router(
    authenticator: Arc<DashboardAuthenticator>,
    system_info_service: Arc<dyn SystemInfoServicePort>,
    secure_cookie: bool,
) -> Router {
    let state = AppState {
        authenticator,
        system_info: system_info_service,
        secure_cookie,
    };

    let public_routes = Router::new().route(LOGIN_PATH, get(login_page).post(login));

    let protected_routes = Router::new()
        .route("/", get(dashboard))
        .route("/main", get(dashboard))
        .route("/system-info", get(system_info))
        .route("/logout", get(logout))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    // Headers are left out of the span: they carry cookies and credentials.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                path = %request.uri().path(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::http::header;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::system::errors::SystemInfoError;
    use crate::domain::system::models::HostSnapshot;
    use crate::domain::system::models::SystemInfo;

    struct FixedSystemInfo;

    #[async_trait]
    impl SystemInfoServicePort for FixedSystemInfo {
        async fn system_info(&self) -> Result<SystemInfo, SystemInfoError> {
            Ok(SystemInfo {
                host: HostSnapshot::default(),
                internet: true,
            })
        }
    }

    fn router() -> (Router, Arc<InMemorySessionStore>) {
        let credentials = Arc::new(StaticCredentialStore::new().with_password("admin", "admin123"));
        let sessions = Arc::new(InMemorySessionStore::new(chrono::Duration::hours(24)));
        let authenticator = Arc::new(Authenticator::new(credentials, Arc::clone(&sessions)));

        (
            create_router(authenticator, Arc::new(FixedSystemInfo), false),
            sessions,
        )
    }

    #[tokio::test]
    async fn test_protected_route_redirects_anonymous() {
        let (app, _) = router();

        let response = app
            .oneshot(Request::get("/system-info").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], LOGIN_PATH);
    }

    #[tokio::test]
    async fn test_login_page_is_public() {
        let (app, _) = router();

        let response = app
            .oneshot(Request::get(LOGIN_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_session_cookie_grants_access() {
        let (app, sessions) = router();
        let session = auth::SessionStore::create(sessions.as_ref(), "admin");

        let response = app
            .oneshot(
                Request::get("/main")
                    .header(header::COOKIE, format!("session_id={}", session.token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_system_info_route_serves_snapshot() {
        let (app, sessions) = router();
        let session = auth::SessionStore::create(sessions.as_ref(), "admin");

        let response = app
            .oneshot(
                Request::get("/system-info")
                    .header(header::COOKIE, format!("session_id={}", session.token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status_code"], 200);
        assert_eq!(body["data"]["internet"], true);
    }

    #[tokio::test]
    async fn test_wrong_basic_credentials_are_unauthorized() {
        let (app, sessions) = router();

        // admin:wrong
        let response = app
            .oneshot(
                Request::get("/")
                    .header(header::AUTHORIZATION, "Basic YWRtaW46d3Jvbmc=")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(auth::SessionStore::len(sessions.as_ref()), 0);
    }
}
