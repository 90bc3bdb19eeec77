//! Cash Register Model (收银机/钱箱会话)
//!
//! One record per opened-till session, bounded by open and close events.
//! At most one OPEN session per branch (enforced at open time).

use serde::{Deserialize, Serialize};

/// Register session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RegisterStatus {
    Open,
    Closed,
}

impl Default for RegisterStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// Cash register session entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CashRegister {
    pub id: i64,
    pub branch_id: i64,
    pub status: RegisterStatus,
    /// 开箱备用金
    pub opening_balance: f64,
    /// 关箱时盘点金额
    pub closing_balance: Option<f64>,
    /// closing_balance - opening_balance
    pub variance: Option<f64>,
    /// Operator display name snapshot
    pub opened_by: String,
    pub opened_at: i64,
    pub closed_at: Option<i64>,
    /// Closed without cash counting (crash, forced close)
    #[serde(default)]
    pub abnormal_close: bool,
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Open register payload (开箱)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashRegisterOpen {
    pub branch_id: i64,
    pub opened_by: String,
    #[serde(default)]
    pub opening_balance: f64,
    pub note: Option<String>,
}

/// Close register payload (关箱, with cash counting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashRegisterClose {
    pub closing_balance: f64,
    pub note: Option<String>,
}

/// Force close payload (abnormal close without cash counting)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CashRegisterForceClose {
    pub note: Option<String>,
}
