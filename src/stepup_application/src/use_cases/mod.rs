pub mod confirm_password;

// Re-export for convenience
pub use confirm_password::{ConfirmPasswordError, ConfirmPasswordUseCase};
