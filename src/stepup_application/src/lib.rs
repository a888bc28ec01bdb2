pub mod use_cases;

pub use use_cases::confirm_password::{ConfirmPasswordError, ConfirmPasswordUseCase};
