//! Status Watcher Service
//!
//! Owns the derived [`RestaurantStatus`] and keeps it current. All triggers
//! funnel through one `tokio::select!` loop:
//!
//! - poll tick (the backing store pushes no change feed for registers)
//! - store settings change (`notify_settings_changed`)
//! - cash register open/close (`notify_register_changed`)
//! - active branch switch (`select_branch`)
//!
//! Consumers read through a `watch` channel; the value is never persisted.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tokio::sync::{Notify, RwLock, watch};
use tokio_util::sync::CancellationToken;

use shared::models::{RestaurantStatus, WeeklySchedule};

use super::register::RegisterCheck;
use super::{composer, matcher, register};
use crate::core::Config;
use crate::db::repository::{branch, store_settings};

/// Injectable clock so evaluations are testable at fixed instants
type NowFn = fn() -> DateTime<Utc>;

/// Reactive evaluator for the storefront order-acceptance status
pub struct StatusService {
    pool: SqlitePool,
    timezone: chrono_tz::Tz,
    poll_interval: Duration,
    production: bool,
    now_fn: NowFn,
    config_notify: Notify,
    register_notify: Notify,
    branch_notify: Notify,
    selected_branch: RwLock<Option<i64>>,
    tx: watch::Sender<RestaurantStatus>,
}

impl StatusService {
    pub fn new(pool: SqlitePool, config: &Config) -> Arc<Self> {
        Self::with_clock(pool, config, Utc::now)
    }

    pub fn with_clock(pool: SqlitePool, config: &Config, now_fn: NowFn) -> Arc<Self> {
        let (tx, _rx) = watch::channel(composer::initial());
        Arc::new(Self {
            pool,
            timezone: config.timezone,
            poll_interval: Duration::from_secs(config.register_poll_secs),
            production: config.is_production(),
            now_fn,
            config_notify: Notify::new(),
            register_notify: Notify::new(),
            branch_notify: Notify::new(),
            selected_branch: RwLock::new(None),
            tx,
        })
    }

    /// Watch the published status (UI push channels subscribe here)
    pub fn subscribe(&self) -> watch::Receiver<RestaurantStatus> {
        self.tx.subscribe()
    }

    /// Latest published status
    pub fn current(&self) -> RestaurantStatus {
        self.tx.borrow().clone()
    }

    pub async fn selected_branch(&self) -> Option<i64> {
        *self.selected_branch.read().await
    }

    /// Switch the active branch.
    ///
    /// Publishes the loading placeholder right away (fail closed while the
    /// first check for the new branch is in flight) and wakes the loop.
    pub async fn select_branch(&self, branch_id: Option<i64>) {
        {
            let mut selected = self.selected_branch.write().await;
            if *selected == branch_id {
                return;
            }
            *selected = branch_id;
        }
        self.tx.send_replace(composer::initial());
        self.branch_notify.notify_one();
    }

    /// Store settings changed (schedule, identity)
    pub fn notify_settings_changed(&self) {
        self.config_notify.notify_one();
    }

    /// A cash register was opened or closed
    pub fn notify_register_changed(&self) {
        self.register_notify.notify_one();
    }

    /// Restore the persisted branch selection; a tenant with exactly one
    /// active branch gets it auto-selected so the storefront works without
    /// a manual selection step.
    pub async fn load_persisted_selection(&self) {
        let persisted = match store_settings::get(&self.pool).await {
            Ok(settings) => settings.and_then(|s| s.active_branch_id),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load persisted branch selection");
                None
            }
        };

        let selection = match persisted {
            Some(id) => Some(id),
            None => match branch::find_active(&self.pool).await {
                Ok(branches) if branches.len() == 1 => {
                    let id = branches[0].id;
                    tracing::info!(branch_id = id, "Auto-selecting the only active branch");
                    if let Err(e) = store_settings::set_active_branch(&self.pool, Some(id)).await {
                        tracing::warn!(error = %e, "Failed to persist auto-selected branch");
                    }
                    Some(id)
                }
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to list branches");
                    None
                }
            },
        };

        *self.selected_branch.write().await = selection;
    }

    /// Evaluate now and publish.
    ///
    /// Returns the published value, or the previously published one when
    /// the evaluation went stale mid-flight (branch switched during the
    /// register query).
    pub async fn refresh(&self) -> RestaurantStatus {
        let branch_id = *self.selected_branch.read().await;

        let schedule = match store_settings::get(&self.pool).await {
            Ok(settings) => settings
                .and_then(|s| s.schedule)
                .map(|config| WeeklySchedule::from_config_lossy(&config)),
            Err(e) => {
                // Unreadable settings fail safe to "no schedule" = closed
                tracing::warn!(error = %e, "Failed to load store settings");
                None
            }
        };

        let now = (self.now_fn)().with_timezone(&self.timezone);
        let hours = matcher::evaluate(schedule.as_ref(), now);

        let register_check = match branch_id {
            Some(id) => register::check(&self.pool, id).await,
            None => RegisterCheck::no_branch(),
        };

        // Stale-branch guard: a result computed for a branch that is no
        // longer selected must not overwrite the current branch's status.
        if *self.selected_branch.read().await != branch_id {
            tracing::debug!(stale_branch = ?branch_id, "Discarding stale status evaluation");
            return self.current();
        }

        let mut status = composer::compose(branch_id, false, &hours, &register_check);
        if self.production {
            status = status.without_debug();
        }
        self.tx.send_replace(status.clone());
        status
    }

    /// Main loop. Registered as a background task at server start.
    pub async fn run(self: Arc<Self>, shutdown: CancellationToken) {
        tracing::info!(
            poll_secs = self.poll_interval.as_secs(),
            "Status watcher started"
        );

        self.load_persisted_selection().await;
        self.refresh().await;

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {
                    self.refresh().await;
                }
                _ = self.config_notify.notified() => {
                    tracing::debug!("Store settings changed, recomputing status");
                    self.refresh().await;
                }
                _ = self.register_notify.notified() => {
                    tracing::debug!("Cash register changed, recomputing status");
                    self.refresh().await;
                }
                _ = self.branch_notify.notified() => {
                    tracing::debug!("Branch selection changed, recomputing status");
                    self.refresh().await;
                }
                _ = shutdown.cancelled() => {
                    tracing::info!("Status watcher received shutdown signal");
                    return;
                }
            }
        }
    }
}
