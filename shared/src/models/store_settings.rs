//! Store Settings Model (Singleton)
//!
//! 店铺信息 + 营业时间配置，每个租户实例只有一条记录。

use serde::{Deserialize, Serialize};

use super::schedule::WeeklyScheduleConfig;

/// Store settings as exchanged over the API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettings {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    /// Tax identification number (NIF)
    #[serde(default)]
    pub nif: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    /// Branch the storefront currently serves
    pub active_branch_id: Option<i64>,
    /// Weekly business hours; None until configured
    pub schedule: Option<WeeklyScheduleConfig>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// DB row shape: the schedule column is raw JSON text
#[cfg(feature = "db")]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreSettingsRow {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub nif: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub active_branch_id: Option<i64>,
    pub schedule: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[cfg(feature = "db")]
impl StoreSettingsRow {
    /// Decode the schedule JSON; a corrupt column logs a warning and reads
    /// as "not configured" rather than failing the whole settings read.
    pub fn into_settings(self) -> StoreSettings {
        let schedule = self.schedule.as_deref().and_then(|raw| {
            match serde_json::from_str::<WeeklyScheduleConfig>(raw) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable schedule JSON");
                    None
                }
            }
        });

        StoreSettings {
            id: self.id,
            name: self.name,
            address: self.address,
            nif: self.nif,
            phone: self.phone,
            email: self.email,
            website: self.website,
            logo_url: self.logo_url,
            active_branch_id: self.active_branch_id,
            schedule,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Update store settings payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreSettingsUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub nif: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    /// Replaces the whole weekly schedule when present
    pub schedule: Option<WeeklyScheduleConfig>,
}
