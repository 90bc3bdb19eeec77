//! Store Settings Repository (Singleton)

use shared::models::{StoreSettings, StoreSettingsRow, StoreSettingsUpdate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const COLUMNS: &str = "id, name, address, nif, phone, email, website, logo_url, active_branch_id, schedule, created_at, updated_at";

/// Get the singleton settings row
pub async fn get(pool: &SqlitePool) -> RepoResult<Option<StoreSettings>> {
    let row = sqlx::query_as::<_, StoreSettingsRow>(&format!(
        "SELECT {COLUMNS} FROM store_settings WHERE id = 1"
    ))
    .fetch_optional(pool)
    .await?;
    Ok(row.map(StoreSettingsRow::into_settings))
}

/// Get or create the singleton settings row
pub async fn get_or_create(pool: &SqlitePool) -> RepoResult<StoreSettings> {
    if let Some(settings) = get(pool).await? {
        return Ok(settings);
    }

    let now = shared::util::now_millis();
    sqlx::query("INSERT OR IGNORE INTO store_settings (id, created_at, updated_at) VALUES (1, ?1, ?1)")
        .bind(now)
        .execute(pool)
        .await?;

    get(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create store settings".into()))
}

/// Merge-update the singleton. The schedule, when present, replaces the
/// stored JSON wholesale (the dashboard always submits the full week).
pub async fn update(pool: &SqlitePool, data: StoreSettingsUpdate) -> RepoResult<StoreSettings> {
    get_or_create(pool).await?;

    let schedule_json = match &data.schedule {
        Some(config) => Some(
            serde_json::to_string(config)
                .map_err(|e| RepoError::Validation(format!("Unserializable schedule: {e}")))?,
        ),
        None => None,
    };

    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE store_settings SET name = COALESCE(?1, name), address = COALESCE(?2, address), nif = COALESCE(?3, nif), phone = COALESCE(?4, phone), email = COALESCE(?5, email), website = COALESCE(?6, website), logo_url = COALESCE(?7, logo_url), schedule = COALESCE(?8, schedule), updated_at = ?9 WHERE id = 1",
    )
    .bind(&data.name)
    .bind(&data.address)
    .bind(&data.nif)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(&data.website)
    .bind(&data.logo_url)
    .bind(&schedule_json)
    .bind(now)
    .execute(pool)
    .await?;

    get(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to update store settings".into()))
}

/// Persist the storefront's active branch (None clears the selection)
pub async fn set_active_branch(pool: &SqlitePool, branch_id: Option<i64>) -> RepoResult<()> {
    get_or_create(pool).await?;

    let now = shared::util::now_millis();
    sqlx::query("UPDATE store_settings SET active_branch_id = ?1, updated_at = ?2 WHERE id = 1")
        .bind(branch_id)
        .bind(now)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use shared::models::{DayOfWeek, DayScheduleConfig, TimeIntervalConfig};

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let pool = memory_pool().await;
        let first = get_or_create(&pool).await.unwrap();
        let second = get_or_create(&pool).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.created_at, first.created_at);
    }

    #[tokio::test]
    async fn update_persists_schedule_round_trip() {
        let pool = memory_pool().await;

        let schedule = vec![DayScheduleConfig {
            day: DayOfWeek::Monday,
            is_open: true,
            intervals: vec![TimeIntervalConfig {
                open: "09:00".into(),
                close: "14:00".into(),
            }],
        }];

        let updated = update(
            &pool,
            StoreSettingsUpdate {
                name: Some("La Gamba Roja".into()),
                schedule: Some(schedule),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "La Gamba Roja");
        let stored = updated.schedule.expect("schedule stored");
        assert_eq!(stored[0].day, DayOfWeek::Monday);
        assert_eq!(stored[0].intervals[0].close, "14:00");

        // Partial update leaves the schedule untouched
        let touched = update(
            &pool,
            StoreSettingsUpdate {
                phone: Some("+34 600 000 000".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(touched.schedule.is_some());
        assert_eq!(touched.name, "La Gamba Roja");
    }

    #[tokio::test]
    async fn active_branch_can_be_set_and_cleared() {
        let pool = memory_pool().await;
        let branch = crate::db::repository::branch::create(
            &pool,
            shared::models::BranchCreate {
                name: "Centro".into(),
                address: String::new(),
            },
        )
        .await
        .unwrap();

        set_active_branch(&pool, Some(branch.id)).await.unwrap();
        assert_eq!(
            get(&pool).await.unwrap().unwrap().active_branch_id,
            Some(branch.id)
        );

        set_active_branch(&pool, None).await.unwrap();
        assert_eq!(get(&pool).await.unwrap().unwrap().active_branch_id, None);
    }

    #[tokio::test]
    async fn corrupt_schedule_json_reads_as_unconfigured() {
        let pool = memory_pool().await;
        get_or_create(&pool).await.unwrap();
        sqlx::query("UPDATE store_settings SET schedule = 'not json' WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();

        let settings = get(&pool).await.unwrap().unwrap();
        assert!(settings.schedule.is_none());
    }
}
