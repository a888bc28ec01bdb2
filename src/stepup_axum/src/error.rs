use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use stepup_application::ConfirmPasswordError;
use stepup_core::UserStoreError;
use thiserror::Error;

/// Errors surfaced by the sudo-mode HTTP layer.
///
/// Wrong-password is *not* in here: it re-renders the form inline and never
/// leaves the handler as an error.
#[derive(Debug, Error)]
pub enum SudoApiError {
    #[error("Request could not be verified")]
    CsrfRejected,

    #[error("Malformed request body")]
    MalformedBody,

    #[error("Session error: {0}")]
    SessionError(#[from] tower_sessions::session::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for SudoApiError {
    fn into_response(self) -> Response {
        match self {
            SudoApiError::CsrfRejected => {
                (StatusCode::FORBIDDEN, self.to_string()).into_response()
            }
            SudoApiError::MalformedBody => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            SudoApiError::SessionError(_)
            | SudoApiError::TemplateError(_)
            | SudoApiError::UnexpectedError(_) => {
                tracing::error!(error = %self, "sudo request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl From<UserStoreError> for SudoApiError {
    fn from(error: UserStoreError) -> Self {
        SudoApiError::UnexpectedError(error.to_string())
    }
}

impl From<ConfirmPasswordError> for SudoApiError {
    fn from(error: ConfirmPasswordError) -> Self {
        match error {
            ConfirmPasswordError::UserStoreError(e) => e.into(),
        }
    }
}
