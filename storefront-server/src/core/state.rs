use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::core::Config;
use crate::db::DbService;
use crate::status::StatusService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc/Pool 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | status | Arc<StatusService> | 接单状态派生服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 接单状态派生服务
    pub status: Arc<StatusService>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/storefront.db)
    /// 3. 状态派生服务
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("storefront.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");
        let pool = db_service.pool;

        let status = StatusService::new(pool.clone(), config);

        Self {
            config: config.clone(),
            pool,
            status,
        }
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 内、接受请求之前调用。
    ///
    /// 启动的任务：
    /// - 接单状态 watcher (轮询 + 通知驱动)
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let watcher = self.status.clone();
        let shutdown = tasks.shutdown_token();
        tasks.spawn("status_watcher", TaskKind::Periodic, async move {
            watcher.run(shutdown).await;
        });
    }
}
