//! Data models
//!
//! Shared between storefront-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY, snowflake-style).

pub mod branch;
pub mod cash_register;
pub mod schedule;
pub mod status;
pub mod store_settings;

// Re-exports
pub use branch::*;
pub use cash_register::*;
pub use schedule::*;
pub use status::*;
pub use store_settings::*;
