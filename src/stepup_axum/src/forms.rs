use std::collections::HashMap;

use secrecy::Secret;
use stepup_core::{Password, UserError};

/// Per-request binding of the password-confirmation form.
///
/// The password and CSRF field names are fixed; the redirect-target field is
/// whatever the policy says, so the body is read as a loose map first and
/// picked apart here. The raw password moves into a `Secret` immediately and
/// stays out of logs.
#[derive(Debug)]
pub struct SudoForm {
    password: Secret<String>,
    redirect_to: Option<String>,
}

impl SudoForm {
    pub fn from_fields(mut fields: HashMap<String, String>, redirect_field_name: &str) -> Self {
        let password = Secret::from(fields.remove("password").unwrap_or_default());
        let redirect_to = fields.remove(redirect_field_name);
        Self {
            password,
            redirect_to,
        }
    }

    /// The submitted password, if one was actually entered.
    pub fn password(&self) -> Result<Password, UserError> {
        Password::try_from(self.password.clone())
    }

    pub fn redirect_to(&self) -> Option<&str> {
        self.redirect_to.as_deref()
    }
}
