//! Shared types for the Gamba storefront platform
//!
//! Model types exchanged between the storefront server and its clients
//! (admin dashboard, public storefront). DB row types derive
//! `sqlx::FromRow` behind the `db` feature so UI crates can depend on
//! this crate without pulling in the database stack.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
