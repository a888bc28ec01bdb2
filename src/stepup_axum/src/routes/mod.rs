pub mod sudo;

pub use sudo::{ExtraContext, confirm_password, show_confirm_form};
