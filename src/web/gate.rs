//! Session gate for protected routes.
//!
//! The login flag lives in the session cookie itself, signed with the key derived
//! from `secret_key`. Any process holding the same secret accepts it.

use crate::web::{AppState, SESSION_COOKIE_NAME};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

/// Cookie value whose presence marks an authenticated operator.
pub const LOGGED_IN_KEY: &str = "logged_in";
pub const LOGIN_PATH: &str = "/login";

/// The signed session cookie carrying the login flag.
pub fn login_cookie(idle_minutes: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, LOGGED_IN_KEY))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(idle_minutes))
        .build()
}

/// Removal cookie that clears the login flag in the browser.
pub fn logout_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE_NAME).path("/").build()
}

pub fn is_logged_in(jar: &SignedCookieJar) -> bool {
    jar.get(SESSION_COOKIE_NAME)
        .is_some_and(|cookie| cookie.value() == LOGGED_IN_KEY)
}

/// Let the request through only when the signed cookie carries the login flag,
/// refreshing its lifetime; otherwise redirect to the login page without running
/// the handler.
pub async fn require_login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    request: Request,
    next: Next,
) -> Response {
    if !is_logged_in(&jar) {
        tracing::debug!(route = %request.uri().path(), "no login flag, redirecting");
        return Redirect::to(LOGIN_PATH).into_response();
    }
    let jar = jar.add(login_cookie(state.config.session_idle_minutes));
    (jar, next.run(request).await).into_response()
}
