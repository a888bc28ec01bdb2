use chrono::Duration;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use stepup_core::{SudoPolicy, domain::policy};

use super::constants::{SETTINGS_FILE_NAME, env, prod};

/// Service settings, assembled from defaults, an optional `stepup.json`
/// file and `STEPUP__`-prefixed environment variables (ascending
/// precedence).
#[derive(Debug, Clone, Deserialize)]
pub struct SudoSetting {
    pub app_address: String,
    pub sudo: SudoSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SudoSection {
    pub redirect_field_name: String,
    pub redirect_url: String,
    pub sudo_url: String,
    pub login_url: String,
    pub max_sudo_age_secs: i64,
}

impl SudoSetting {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .set_default("app_address", prod::APP_ADDRESS)?
            .set_default(
                "sudo.redirect_field_name",
                policy::DEFAULT_REDIRECT_FIELD_NAME,
            )?
            .set_default("sudo.redirect_url", policy::DEFAULT_REDIRECT_URL)?
            .set_default("sudo.sudo_url", policy::DEFAULT_SUDO_URL)?
            .set_default("sudo.login_url", policy::DEFAULT_LOGIN_URL)?
            .set_default("sudo.max_sudo_age_secs", policy::DEFAULT_MAX_SUDO_AGE_SECS)?
            .add_source(File::new(SETTINGS_FILE_NAME, FileFormat::Json).required(false))
            .add_source(Environment::with_prefix(env::SETTINGS_ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }

    /// The handler-facing policy object built from these settings.
    pub fn policy(&self) -> SudoPolicy {
        SudoPolicy {
            redirect_field_name: self.sudo.redirect_field_name.clone(),
            redirect_url: self.sudo.redirect_url.clone(),
            sudo_url: self.sudo.sudo_url.clone(),
            login_url: self.sudo.login_url.clone(),
            max_sudo_age: Duration::seconds(self.sudo.max_sudo_age_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_default_policy() {
        let setting = SudoSetting::load().unwrap();
        let policy = setting.policy();
        let default = SudoPolicy::default();

        assert_eq!(policy.redirect_field_name, default.redirect_field_name);
        assert_eq!(policy.redirect_url, default.redirect_url);
        assert_eq!(policy.sudo_url, default.sudo_url);
        assert_eq!(policy.login_url, default.login_url);
        assert_eq!(policy.max_sudo_age, default.max_sudo_age);
        assert_eq!(setting.app_address, prod::APP_ADDRESS);
    }
}
