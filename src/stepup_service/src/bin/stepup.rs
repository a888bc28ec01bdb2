use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use color_eyre::eyre::Result;
use secrecy::Secret;
use serde::Deserialize;
use stepup_adapters::{HashMapUserStore, SudoSetting, config::constants::env};
use stepup_axum::session;
use stepup_core::{Email, Password, User, UserStore};
use stepup_service::{SudoService, init_tracing};
use tower_sessions::{MemoryStore, Session, SessionManagerLayer};

/// Example of running the sudo-mode service standalone: a demo user from the
/// environment, a minimal login/logout flow and one guarded page.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    let setting = SudoSetting::load()?;
    let policy = setting.policy();

    // Create the user store and seed the demo account, if configured
    let user_store = HashMapUserStore::new();
    seed_demo_user(&user_store).await?;

    let session_layer = SessionManagerLayer::new(MemoryStore::default());

    let service = SudoService::new(user_store.clone(), policy.clone(), session_layer)
        .with_routes(
            Router::new()
                .route(&policy.login_url, post(login))
                .route("/logout", post(logout))
                .with_state(user_store),
        )
        .protect(Router::new().route("/account/billing", get(billing)));

    let listener = tokio::net::TcpListener::bind(&setting.app_address).await?;
    service.run_standalone(listener).await?;

    Ok(())
}

async fn seed_demo_user(user_store: &HashMapUserStore) -> Result<()> {
    let (Ok(email), Ok(password)) = (
        std::env::var(env::DEMO_EMAIL_ENV_VAR),
        std::env::var(env::DEMO_PASSWORD_ENV_VAR),
    ) else {
        tracing::warn!(
            "no demo user configured; set {} and {} to log in",
            env::DEMO_EMAIL_ENV_VAR,
            env::DEMO_PASSWORD_ENV_VAR
        );
        return Ok(());
    };

    let user = User::new(
        Email::try_from(Secret::from(email))?,
        Password::try_from(Secret::from(password))?,
    );
    user_store.add_user(user).await?;

    Ok(())
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    email: String,
    password: Secret<String>,
}

/// Minimal stand-in for the host application's login flow.
#[tracing::instrument(name = "Demo login", skip_all)]
async fn login(
    State(user_store): State<HashMapUserStore>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    let Ok(email) = Email::try_from(Secret::from(form.email)) else {
        return StatusCode::BAD_REQUEST;
    };
    let Ok(password) = Password::try_from(form.password) else {
        return StatusCode::BAD_REQUEST;
    };

    match user_store.authenticate_user(&email, &password).await {
        Ok(_) => match session::sign_in(&session, &email).await {
            Ok(()) => StatusCode::NO_CONTENT,
            Err(error) => {
                tracing::error!(%error, "failed to establish session");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        },
        Err(_) => StatusCode::UNAUTHORIZED,
    }
}

#[tracing::instrument(name = "Demo logout", skip_all)]
async fn logout(session: Session) -> impl IntoResponse {
    match session::sign_out(&session).await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(error) => {
            tracing::error!(%error, "failed to destroy session");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// A page worth protecting.
async fn billing() -> &'static str {
    "Billing settings"
}
