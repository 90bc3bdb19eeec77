//! Cash-Register Presence Check
//!
//! A query failure must never read as a confirmed "closed": presence goes
//! false (fail safe, orders stay blocked) while the error is retained so
//! callers can tell "confirmed no register" apart from "check failed".

use shared::models::CashRegister;
use sqlx::SqlitePool;

use crate::db::repository::cash_register;

/// Outcome of one presence check
#[derive(Debug, Clone, Default)]
pub struct RegisterCheck {
    pub has_open: bool,
    pub open_registers: Vec<CashRegister>,
    /// Retained query error; `None` means the result is authoritative
    pub error: Option<String>,
}

impl RegisterCheck {
    /// Absent branch selection: nothing to query, confirmed no register
    pub fn no_branch() -> Self {
        Self::default()
    }
}

/// Query open till sessions for the branch, folding failure into fail-safe
pub async fn check(pool: &SqlitePool, branch_id: i64) -> RegisterCheck {
    match cash_register::find_open_by_branch(pool, branch_id).await {
        Ok(registers) => RegisterCheck {
            has_open: !registers.is_empty(),
            open_registers: registers,
            error: None,
        },
        Err(e) => {
            tracing::warn!(branch_id, error = %e, "Cash register check failed");
            RegisterCheck {
                has_open: false,
                open_registers: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}
