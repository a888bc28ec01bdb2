pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::Email,
    password::Password,
    policy::SudoPolicy,
    redirect::RedirectTarget,
    sudo_grant::SudoGrant,
    user::{User, UserError},
};

pub use ports::repositories::{UserStore, UserStoreError};
