//! The elevation view: password confirmation for an already signed-in user.

use std::{collections::HashMap, sync::Arc};

use askama::Template;
use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Host;
use stepup_application::ConfirmPasswordUseCase;
use stepup_core::{RedirectTarget, SudoPolicy, UserStore};
use tower_sessions::Session;

use crate::{
    csrf::{self, CSRF_FIELD_NAME},
    error::SudoApiError,
    forms::SudoForm,
    session,
};

const INCORRECT_PASSWORD_ERROR: &str =
    "Your password was entered incorrectly. Please enter it again.";
const PASSWORD_REQUIRED_ERROR: &str = "Enter your password.";

/// Extra template variables the host application wants merged into the
/// confirmation page.
#[derive(Debug, Clone, Default)]
pub struct ExtraContext(Arc<Vec<(String, String)>>);

impl ExtraContext {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self(Arc::new(entries))
    }

    fn entries(&self) -> &[(String, String)] {
        &self.0
    }
}

#[derive(Template)]
#[template(path = "sudo.html")]
struct ConfirmPage<'a> {
    error: Option<&'a str>,
    redirect_field_name: &'a str,
    redirect_to: &'a str,
    csrf_field_name: &'a str,
    csrf_token: &'a str,
    extra: &'a [(String, String)],
}

/// GET half of the elevation view: render the confirmation form, or redirect
/// straight through when the session already holds a fresh grant.
#[tracing::instrument(name = "Sudo confirmation page", skip_all)]
pub async fn show_confirm_form<U>(
    State((_, policy, extra)): State<(U, SudoPolicy, ExtraContext)>,
    Host(host): Host,
    session: Session,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, SudoApiError>
where
    U: UserStore + Clone + 'static,
{
    let redirect_to = requested_target(
        params.get(&policy.redirect_field_name).map(String::as_str),
        &policy,
        &host,
    );

    if session::is_sudo(&session, policy.max_sudo_age).await? {
        return Ok(Redirect::to(&redirect_to).into_response());
    }

    let csrf_token = csrf::issue_token(&session).await?;
    render_confirm_page(&policy, &extra, &redirect_to, &csrf_token, None)
}

/// POST half of the elevation view: validate the password, grant sudo and
/// redirect, or re-render the form with an inline error.
#[tracing::instrument(name = "Sudo password confirmation", skip_all)]
pub async fn confirm_password<U>(
    State((user_store, policy, extra)): State<(U, SudoPolicy, ExtraContext)>,
    Host(host): Host,
    session: Session,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response, SudoApiError>
where
    U: UserStore + Clone + 'static,
{
    let form = SudoForm::from_fields(fields, &policy.redirect_field_name);
    let redirect_to = requested_target(form.redirect_to(), &policy, &host);

    // An already-privileged session passes straight through; the stored
    // grant keeps its original timestamp.
    if session::is_sudo(&session, policy.max_sudo_age).await? {
        return Ok(Redirect::to(&redirect_to).into_response());
    }

    // The login guard runs before this handler; a missing user here means
    // the session expired mid-flight.
    let Some(email) = session::current_user(&session).await? else {
        return Ok(Redirect::to(&policy.login_url).into_response());
    };

    let password = match form.password() {
        Ok(password) => password,
        Err(_) => {
            let csrf_token = csrf::issue_token(&session).await?;
            return render_confirm_page(
                &policy,
                &extra,
                &redirect_to,
                &csrf_token,
                Some(PASSWORD_REQUIRED_ERROR),
            );
        }
    };

    match ConfirmPasswordUseCase::new(user_store)
        .execute(email, password)
        .await
    {
        Ok(_) => {
            session::grant_sudo(&session).await?;
            Ok(Redirect::to(&redirect_to).into_response())
        }
        Err(error) if error.is_bad_credentials() => {
            let csrf_token = csrf::issue_token(&session).await?;
            render_confirm_page(
                &policy,
                &extra,
                &redirect_to,
                &csrf_token,
                Some(INCORRECT_PASSWORD_ERROR),
            )
        }
        Err(error) => Err(error.into()),
    }
}

/// Destination from the request: defaulted when absent, swapped for the
/// policy default when it fails the same-origin check.
fn requested_target(requested: Option<&str>, policy: &SudoPolicy, host: &str) -> String {
    let raw = requested.unwrap_or(&policy.redirect_url);
    RedirectTarget::new(raw).sanitize(host, &policy.redirect_url)
}

fn render_confirm_page(
    policy: &SudoPolicy,
    extra: &ExtraContext,
    redirect_to: &str,
    csrf_token: &str,
    error: Option<&str>,
) -> Result<Response, SudoApiError> {
    let page = ConfirmPage {
        error,
        redirect_field_name: &policy.redirect_field_name,
        redirect_to,
        csrf_field_name: CSRF_FIELD_NAME,
        csrf_token,
        extra: extra.entries(),
    };
    Ok(Html(page.render()?).into_response())
}
