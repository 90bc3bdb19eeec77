//! Branch Model (门店分店)

use serde::{Deserialize, Serialize};

/// Branch entity - one physical location of the tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Branch {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    /// Inactive branches are hidden from the storefront and cannot be selected
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create branch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchCreate {
    pub name: String,
    #[serde(default)]
    pub address: String,
}

/// Update branch payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BranchUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}
