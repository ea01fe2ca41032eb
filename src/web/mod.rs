//! HTTP surface: router, signed-cookie session, and request tracing.
//!
//! Every route except `/login` and `/logout` sits behind [`gate::require_login`].
//! Handlers return `Result<_, RosterError>`; any error becomes a plain 500.

pub mod gate;
pub mod routes;
pub mod views;

use crate::core::config::Config;
use crate::core::error::RosterError;
use crate::core::store::Store;
use crate::plugins::study::StudyClient;
use axum::extract::{FromRef, Request};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::Instrument;

pub const SESSION_COOKIE_NAME: &str = "roster_session";

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<Config>,
    pub study: Arc<StudyClient>,
    cookie_key: Key,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> Self {
        let study = StudyClient::new(&config.completion);
        let cookie_key = session_key(&config.secret_key);
        Self {
            store,
            config: Arc::new(config),
            study: Arc::new(study),
            cookie_key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

/// Derive the 64-byte cookie signing key from the configured secret.
fn session_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .route("/", get(routes::index))
        .route(
            "/adolescente",
            get(routes::new_adolescent_form).post(routes::create_adolescent),
        )
        .route(
            "/adolescente/:id",
            get(routes::edit_adolescent_form).post(routes::edit_adolescent),
        )
        .route("/cadastrar_pg", post(routes::register_guardian))
        .route("/excluir/:id", get(routes::delete_adolescent))
        .route("/chatgpt", post(routes::study_outline))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            gate::require_login,
        ));

    Router::new()
        .route(gate::LOGIN_PATH, get(routes::login_page).post(routes::login))
        .route("/logout", get(routes::logout))
        .merge(protected)
        .layer(middleware::from_fn(trace_request))
        .with_state(state)
}

async fn trace_request(request: Request, next: Next) -> Response {
    let span = tracing::info_span!(
        "http.request",
        method = %request.method(),
        route = %request.uri().path(),
    );
    let response = next.run(request).instrument(span.clone()).await;
    span.in_scope(|| tracing::info!(status = response.status().as_u16(), "request served"));
    response
}

/// Serve until Ctrl-C.
pub async fn serve(state: AppState) -> Result<(), RosterError> {
    let addr: SocketAddr = state.config.bind.parse().map_err(|e| {
        RosterError::ConfigError(format!("invalid bind address '{}': {}", state.config.bind, e))
    })?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, db = %state.store.db_path.display(), "roster listening");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
