//! Branch Repository

use shared::models::{Branch, BranchCreate, BranchUpdate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Branch>> {
    let branches = sqlx::query_as::<_, Branch>(
        "SELECT id, name, address, is_active, created_at, updated_at FROM branch ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(branches)
}

pub async fn find_active(pool: &SqlitePool) -> RepoResult<Vec<Branch>> {
    let branches = sqlx::query_as::<_, Branch>(
        "SELECT id, name, address, is_active, created_at, updated_at FROM branch WHERE is_active = 1 ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(branches)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Branch>> {
    let branch = sqlx::query_as::<_, Branch>(
        "SELECT id, name, address, is_active, created_at, updated_at FROM branch WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(branch)
}

pub async fn create(pool: &SqlitePool, data: BranchCreate) -> RepoResult<Branch> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO branch (id, name, address, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, 1, ?4, ?4)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.address)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create branch".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: BranchUpdate) -> RepoResult<Branch> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE branch SET name = COALESCE(?1, name), address = COALESCE(?2, address), is_active = COALESCE(?3, is_active), updated_at = ?4 WHERE id = ?5",
    )
    .bind(&data.name)
    .bind(&data.address)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Branch {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Branch {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    // Refuse while a till session is still open on this branch
    let open_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM cash_register WHERE branch_id = ? AND status = 'OPEN'",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if open_count > 0 {
        return Err(RepoError::Validation(
            "Cannot delete branch with an open cash register".into(),
        ));
    }
    let rows = sqlx::query("DELETE FROM branch WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    #[tokio::test]
    async fn create_find_update_delete() {
        let pool = memory_pool().await;

        let branch = create(
            &pool,
            BranchCreate {
                name: "Centro".into(),
                address: "Calle Mayor 1".into(),
            },
        )
        .await
        .unwrap();
        assert!(branch.is_active);

        let updated = update(
            &pool,
            branch.id,
            BranchUpdate {
                name: Some("Centro Histórico".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "Centro Histórico");
        assert_eq!(updated.address, "Calle Mayor 1");

        assert!(delete(&pool, branch.id).await.unwrap());
        assert!(find_by_id(&pool, branch.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_missing_branch_is_not_found() {
        let pool = memory_pool().await;
        let err = update(&pool, 999, BranchUpdate::default()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_refused_while_register_open() {
        let pool = memory_pool().await;
        let branch = create(
            &pool,
            BranchCreate {
                name: "Puerto".into(),
                address: String::new(),
            },
        )
        .await
        .unwrap();

        super::super::cash_register::open(
            &pool,
            shared::models::CashRegisterOpen {
                branch_id: branch.id,
                opened_by: "Ana".into(),
                opening_balance: 100.0,
                note: None,
            },
        )
        .await
        .unwrap();

        let err = delete(&pool, branch.id).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
