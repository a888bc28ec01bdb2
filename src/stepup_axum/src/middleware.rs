//! The ordered request-preprocessing steps wrapping the elevation view.
//!
//! Each step can short-circuit with its own response before the handler
//! body runs: the login guard redirects to the login page, the sudo guard
//! bounces through the elevation view, and the cache step only stamps the
//! response on the way out.

use axum::{
    extract::{OriginalUri, Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use stepup_core::SudoPolicy;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_sessions::Session;

use crate::{error::SudoApiError, redirect::redirect_to_sudo, session};

/// Redirect session-less requests to the login page.
pub async fn require_user(
    State(policy): State<SudoPolicy>,
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, SudoApiError> {
    if session::current_user(&session).await?.is_none() {
        return Ok(Redirect::to(&policy.login_url).into_response());
    }
    Ok(next.run(request).await)
}

/// Bounce requests without a fresh sudo grant through the elevation view,
/// carrying the original URL as the post-elevation destination.
pub async fn require_sudo(
    State(policy): State<SudoPolicy>,
    session: Session,
    OriginalUri(uri): OriginalUri,
    request: Request,
    next: Next,
) -> Result<Response, SudoApiError> {
    if session::current_user(&session).await?.is_none() {
        return Ok(Redirect::to(&policy.login_url).into_response());
    }
    if !session::is_sudo(&session, policy.max_sudo_age).await? {
        let next_url = uri
            .path_and_query()
            .map_or(policy.redirect_url.as_str(), |pq| pq.as_str());
        return Ok(redirect_to_sudo(next_url, &policy).into_response());
    }
    Ok(next.run(request).await)
}

/// Response layer marking the confirmation page uncacheable.
pub fn never_cache_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        HeaderValue::from_static("max-age=0, no-cache, no-store, must-revalidate, private"),
    )
}
