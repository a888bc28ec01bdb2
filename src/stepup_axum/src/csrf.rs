//! Session-bound CSRF protection for the confirmation form.
//!
//! One token per session, issued when the form is first rendered and carried
//! back in a hidden field. The middleware runs before the elevation handler
//! and rejects unsafe-method requests whose token does not match.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    middleware::Next,
    response::Response,
};
use rand::{Rng, distr::Alphanumeric};
use tower_sessions::Session;
use url::form_urlencoded;

use crate::error::SudoApiError;

pub const CSRF_SESSION_KEY: &str = "stepup.csrf";
pub const CSRF_FIELD_NAME: &str = "csrf_token";

const CSRF_TOKEN_LENGTH: usize = 32;

/// Sudo form bodies are tiny; anything bigger is not ours.
const MAX_FORM_BYTES: usize = 64 * 1024;

fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CSRF_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// The session's CSRF token, minting one on first use.
pub async fn issue_token(session: &Session) -> Result<String, SudoApiError> {
    if let Some(token) = session.get::<String>(CSRF_SESSION_KEY).await? {
        return Ok(token);
    }
    let token = generate_token();
    session.insert(CSRF_SESSION_KEY, &token).await?;
    Ok(token)
}

/// Constant-time comparison to prevent timing attacks.
fn tokens_match(session_token: &str, request_token: &str) -> bool {
    if session_token.len() != request_token.len() {
        return false;
    }
    session_token
        .bytes()
        .zip(request_token.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Middleware rejecting unsafe-method requests whose form token does not
/// match the session token.
///
/// The body is buffered to read the token field, then restored so the
/// handler's own extractor still sees it.
pub async fn csrf_protect(
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, SudoApiError> {
    if matches!(request.method().as_str(), "GET" | "HEAD" | "OPTIONS" | "TRACE") {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(|_| SudoApiError::MalformedBody)?;

    let mut submitted = None;
    for (name, value) in form_urlencoded::parse(&bytes) {
        if name == CSRF_FIELD_NAME {
            submitted = Some(value.into_owned());
            break;
        }
    }

    let expected: Option<String> = session.get(CSRF_SESSION_KEY).await?;

    match (expected, submitted) {
        (Some(expected), Some(submitted)) if tokens_match(&expected, &submitted) => {
            let request = Request::from_parts(parts, Body::from(bytes));
            Ok(next.run(request).await)
        }
        _ => Err(SudoApiError::CsrfRejected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_match_is_exact() {
        assert!(tokens_match("abc123", "abc123"));
        assert!(!tokens_match("abc123", "abc124"));
        assert!(!tokens_match("abc123", "abc12"));
        assert!(!tokens_match("", "abc123"));
    }

    #[test]
    fn generated_tokens_are_alphanumeric_and_sized() {
        let token = generate_token();
        assert_eq!(token.len(), CSRF_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generated_tokens_differ() {
        assert_ne!(generate_token(), generate_token());
    }
}
