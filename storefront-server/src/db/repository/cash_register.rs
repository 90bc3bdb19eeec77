//! Cash Register Repository

use shared::models::{CashRegister, CashRegisterClose, CashRegisterForceClose, CashRegisterOpen};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

fn validate_cash_amount(amount: f64, field_name: &str) -> RepoResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(RepoError::Validation(format!(
            "{field_name} must be a non-negative amount: {amount}"
        )));
    }
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<CashRegister>> {
    let register = sqlx::query_as::<_, CashRegister>(
        "SELECT id, branch_id, status, opening_balance, closing_balance, variance, opened_by, opened_at, closed_at, abnormal_close, note, created_at, updated_at FROM cash_register WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(register)
}

/// All OPEN sessions for a branch. The open-time invariant keeps this to at
/// most one record, but the query does not assume it.
pub async fn find_open_by_branch(pool: &SqlitePool, branch_id: i64) -> RepoResult<Vec<CashRegister>> {
    let registers = sqlx::query_as::<_, CashRegister>(
        "SELECT id, branch_id, status, opening_balance, closing_balance, variance, opened_by, opened_at, closed_at, abnormal_close, note, created_at, updated_at FROM cash_register WHERE branch_id = ? AND status = 'OPEN' ORDER BY opened_at DESC",
    )
    .bind(branch_id)
    .fetch_all(pool)
    .await?;
    Ok(registers)
}

pub async fn find_all(pool: &SqlitePool, limit: i32, offset: i32) -> RepoResult<Vec<CashRegister>> {
    let registers = sqlx::query_as::<_, CashRegister>(
        "SELECT id, branch_id, status, opening_balance, closing_balance, variance, opened_by, opened_at, closed_at, abnormal_close, note, created_at, updated_at FROM cash_register ORDER BY opened_at DESC LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(registers)
}

pub async fn find_by_date_range(
    pool: &SqlitePool,
    start_millis: i64,
    end_millis: i64,
) -> RepoResult<Vec<CashRegister>> {
    let registers = sqlx::query_as::<_, CashRegister>(
        "SELECT id, branch_id, status, opening_balance, closing_balance, variance, opened_by, opened_at, closed_at, abnormal_close, note, created_at, updated_at FROM cash_register WHERE opened_at >= ? AND opened_at < ? ORDER BY opened_at DESC",
    )
    .bind(start_millis)
    .bind(end_millis)
    .fetch_all(pool)
    .await?;
    Ok(registers)
}

pub async fn open(pool: &SqlitePool, data: CashRegisterOpen) -> RepoResult<CashRegister> {
    validate_cash_amount(data.opening_balance, "Opening balance")?;

    // At most one OPEN session per branch
    if !find_open_by_branch(pool, data.branch_id).await?.is_empty() {
        return Err(RepoError::Duplicate(format!(
            "Branch {} already has an open cash register",
            data.branch_id
        )));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO cash_register (id, branch_id, status, opening_balance, opened_by, opened_at, abnormal_close, note, created_at, updated_at) VALUES (?1, ?2, 'OPEN', ?3, ?4, ?5, 0, ?6, ?5, ?5)",
    )
    .bind(id)
    .bind(data.branch_id)
    .bind(data.opening_balance)
    .bind(&data.opened_by)
    .bind(now)
    .bind(&data.note)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to open cash register".into()))
}

pub async fn close(pool: &SqlitePool, id: i64, data: CashRegisterClose) -> RepoResult<CashRegister> {
    validate_cash_amount(data.closing_balance, "Closing balance")?;
    let now = shared::util::now_millis();

    // Atomic: compute variance = closing_balance - opening_balance in SQL
    let rows = sqlx::query(
        "UPDATE cash_register SET status = 'CLOSED', closed_at = ?1, closing_balance = ?2, variance = (?2 - opening_balance), abnormal_close = 0, note = COALESCE(?3, note), updated_at = ?1 WHERE id = ?4 AND status = 'OPEN'",
    )
    .bind(now)
    .bind(data.closing_balance)
    .bind(&data.note)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Cash register {id} not found or already closed"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Cash register {id} not found")))
}

pub async fn force_close(
    pool: &SqlitePool,
    id: i64,
    data: CashRegisterForceClose,
) -> RepoResult<CashRegister> {
    let now = shared::util::now_millis();
    let note = data
        .note
        .as_deref()
        .unwrap_or("Force closed without cash counting");

    let rows = sqlx::query(
        "UPDATE cash_register SET status = 'CLOSED', closed_at = ?1, abnormal_close = 1, note = ?2, updated_at = ?1 WHERE id = ?3 AND status = 'OPEN'",
    )
    .bind(now)
    .bind(note)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Cash register {id} not found or already closed"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Cash register {id} not found")))
}
