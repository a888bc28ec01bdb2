mod sudo_service;
mod tracing;

pub use crate::tracing::init_tracing;
pub use sudo_service::SudoService;

// Re-export commonly used types
pub use stepup_core::{SudoPolicy, UserStore};
