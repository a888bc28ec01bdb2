pub mod config;
pub mod persistence;

// Re-export commonly used adapters for convenience
pub use config::settings::SudoSetting;
pub use persistence::hashmap_user_store::HashMapUserStore;
