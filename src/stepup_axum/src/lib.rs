//! Axum integration for the stepup sudo-mode library.
//!
//! This crate wires the framework-agnostic pieces (domain rules, the
//! password-confirmation use case) into axum: the elevation view, the
//! redirect-to-sudo helper, the session helpers and the middleware chain
//! that stands in for the original decorator stack.
//!
//! # Usage
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use stepup_axum::{middleware, routes};
//!
//! let app = Router::new()
//!     .route("/sudo", get(routes::show_confirm_form::<S>).post(routes::confirm_password::<S>))
//!     .layer(middleware::never_cache_layer())
//!     .layer(axum::middleware::from_fn(stepup_axum::csrf::csrf_protect))
//!     .layer(axum::middleware::from_fn_with_state(policy, middleware::require_user))
//!     .with_state(state);
//! ```

pub mod csrf;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod redirect;
pub mod routes;
pub mod session;

// Re-export for convenience
pub use error::SudoApiError;
pub use forms::SudoForm;
pub use redirect::{redirect_to_sudo, sudo_url_with_next};
pub use routes::{ExtraContext, confirm_password, show_confirm_form};
