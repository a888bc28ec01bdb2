//! # Stepup - Sudo Mode for Web Sessions
//!
//! This is a facade crate that re-exports all public APIs from the sudo-mode
//! components. Use this crate to get access to the whole library in one
//! place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! stepup = { path = "../stepup" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `SudoGrant`, `RedirectTarget`, `SudoPolicy`
//! - **Repository traits**: `UserStore`
//! - **Use cases**: `ConfirmPasswordUseCase`
//! - **Adapters**: `HashMapUserStore`, `SudoSetting`
//! - **Axum layer**: the elevation view, `redirect_to_sudo`, session helpers, middleware
//! - **Service**: `SudoService` - The main entry point for the sudo service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use stepup_core::*;
}

// Re-export most commonly used core types at the root level
pub use stepup_core::{Email, Password, RedirectTarget, SudoGrant, SudoPolicy, User, UserError};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use stepup_core::{UserStore, UserStoreError};
}

// Re-export repository traits at root level
pub use stepup_core::{UserStore, UserStoreError};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use stepup_application::*;
}

// Re-export use cases at root level
pub use stepup_application::{ConfirmPasswordError, ConfirmPasswordUseCase};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use stepup_adapters::persistence::*;
    }

    /// Configuration
    pub mod config {
        pub use stepup_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use stepup_adapters::{HashMapUserStore, SudoSetting};

// ============================================================================
// Axum Integration
// ============================================================================

/// Axum handlers, middleware and session helpers
pub mod web {
    pub use stepup_axum::*;
}

// Re-export the pieces protected handlers reach for most
pub use stepup_axum::{ExtraContext, SudoApiError, redirect_to_sudo, sudo_url_with_next};

// ============================================================================
// Sudo Service (Main Entry Point)
// ============================================================================

/// Main sudo service
pub use stepup_service::{SudoService, init_tracing};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

/// Re-export the session machinery hosts wire their own layer from
pub use tower_sessions;

pub use http;
