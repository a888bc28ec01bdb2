//! Session state for sudo mode.
//!
//! The session is the only state this component touches: a marker for the
//! signed-in user, the sudo grant, and (elsewhere) the CSRF token. Keys are
//! namespaced so they coexist with whatever else the host keeps in the
//! session.

use chrono::{Duration, Utc};
use secrecy::Secret;
use stepup_core::{Email, SudoGrant};
use tower_sessions::Session;

pub const USER_SESSION_KEY: &str = "stepup.user";
pub const SUDO_SESSION_KEY: &str = "stepup.sudo";

type SessionResult<T> = Result<T, tower_sessions::session::Error>;

/// Mark the session as belonging to `email`.
///
/// The session id is cycled so a pre-login session cannot be fixated into
/// an authenticated one.
pub async fn sign_in(session: &Session, email: &Email) -> SessionResult<()> {
    session.cycle_id().await?;
    session.insert(USER_SESSION_KEY, email.as_str()).await
}

/// Destroy the session entirely. Sudo privileges die with it.
pub async fn sign_out(session: &Session) -> SessionResult<()> {
    session.flush().await
}

/// The signed-in user, if any.
///
/// A marker that no longer parses as an email is treated as signed out.
pub async fn current_user(session: &Session) -> SessionResult<Option<Email>> {
    let marker: Option<String> = session.get(USER_SESSION_KEY).await?;
    Ok(marker.and_then(|raw| Email::try_from(Secret::from(raw)).ok()))
}

/// Grant sudo privileges, stamped with the current time.
pub async fn grant_sudo(session: &Session) -> SessionResult<SudoGrant> {
    let grant = SudoGrant::issued(Utc::now());
    session.insert(SUDO_SESSION_KEY, grant).await?;
    Ok(grant)
}

/// Drop sudo privileges without touching the rest of the session.
pub async fn revoke_sudo(session: &Session) -> SessionResult<()> {
    session
        .remove::<SudoGrant>(SUDO_SESSION_KEY)
        .await
        .map(|_| ())
}

/// Whether the session holds a sudo grant no older than `max_age`.
pub async fn is_sudo(session: &Session, max_age: Duration) -> SessionResult<bool> {
    let grant: Option<SudoGrant> = session.get(SUDO_SESSION_KEY).await?;
    Ok(grant.is_some_and(|grant| grant.is_fresh(Utc::now(), max_age)))
}
