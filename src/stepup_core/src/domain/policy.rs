use chrono::Duration;

/// Default name of the query/form parameter carrying the post-elevation
/// destination.
pub const DEFAULT_REDIRECT_FIELD_NAME: &str = "next";

/// Default destination when no (safe) target was supplied.
pub const DEFAULT_REDIRECT_URL: &str = "/";

/// Default path of the elevation view.
pub const DEFAULT_SUDO_URL: &str = "/sudo";

/// Default login page unauthenticated requests are sent to.
pub const DEFAULT_LOGIN_URL: &str = "/login";

/// Default lifetime of a sudo grant.
pub const DEFAULT_MAX_SUDO_AGE_SECS: i64 = 3 * 60 * 60;

/// Static configuration for the sudo-mode component.
///
/// Passed into handlers as state rather than read from globals, so tests and
/// embedding applications can override any of it without process-wide
/// mutation.
#[derive(Debug, Clone)]
pub struct SudoPolicy {
    /// Query/form parameter naming the post-elevation destination.
    pub redirect_field_name: String,

    /// Fallback destination when the supplied target is absent or unsafe.
    pub redirect_url: String,

    /// URL of the elevation view. May carry a query string; the
    /// redirect-target parameter is merged into it.
    pub sudo_url: String,

    /// Where session-less requests are redirected.
    pub login_url: String,

    /// How long a sudo grant stays valid.
    pub max_sudo_age: Duration,
}

impl SudoPolicy {
    /// Path component of `sudo_url`, for route registration.
    pub fn sudo_path(&self) -> &str {
        self.sudo_url
            .split_once('?')
            .map_or(self.sudo_url.as_str(), |(path, _)| path)
    }
}

impl Default for SudoPolicy {
    fn default() -> Self {
        Self {
            redirect_field_name: DEFAULT_REDIRECT_FIELD_NAME.to_string(),
            redirect_url: DEFAULT_REDIRECT_URL.to_string(),
            sudo_url: DEFAULT_SUDO_URL.to_string(),
            login_url: DEFAULT_LOGIN_URL.to_string(),
            max_sudo_age: Duration::seconds(DEFAULT_MAX_SUDO_AGE_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sudo_path_strips_a_query_string() {
        let policy = SudoPolicy {
            sudo_url: "/sudo?lang=en".to_string(),
            ..SudoPolicy::default()
        };
        assert_eq!(policy.sudo_path(), "/sudo");
        assert_eq!(SudoPolicy::default().sudo_path(), "/sudo");
    }
}
