//! 门店接单状态派生 (Order-Acceptance Status)
//!
//! 三个独立信号合成一个布尔判定 + 固定文案：
//!
//! - [`matcher`] - 营业时间匹配 (weekly schedule)
//! - [`register`] - 当前分店是否有开着的钱箱
//! - [`composer`] - 按优先级合成 `RestaurantStatus`
//! - [`service`] - 后台 watcher：轮询 + 变更通知驱动重算
//!
//! The derived value is never persisted; it lives in a `watch` channel and
//! is recomputed whenever any input changes.

pub mod composer;
pub mod matcher;
pub mod register;
pub mod service;

pub use matcher::HoursCheck;
pub use register::RegisterCheck;
pub use service::StatusService;
