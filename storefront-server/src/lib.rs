//! Gamba Storefront Server - 多租户餐厅 SaaS 的门店节点
//!
//! # 架构概述
//!
//! 一个实例服务一个租户 (餐厅)，租户可以有多个分店。核心是接单状态派生：
//! 营业时间 + 钱箱状态 + 分店选择 → 单一的 `RestaurantStatus`。
//!
//! - **状态派生** (`status`): schedule 匹配、钱箱存在性检查、优先级合成、后台 watcher
//! - **数据库** (`db`): 嵌入式 SQLite (WAL) 存储
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! storefront-server/src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── api/           # HTTP 路由和处理器
//! ├── status/        # 接单状态派生 (核心)
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod status;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use shared::models::RestaurantStatus;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    utils::logger::init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ______                 __
  / ____/___ _____ ___  / /_  ____ _
 / / __/ __ `/ __ `__ \/ __ \/ __ `/
/ /_/ / /_/ / / / / / / /_/ / /_/ /
\____/\__,_/_/ /_/ /_/_.___/\__,_/
    "#
    );
}
