//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 校验配置、启动 / 连接浏览器
//! - 加载预订请求
//! - 持有 Browser 和 CdpSurface，确保生命周期正确
//!
//! ### `gym_booker` - 预订编排器
//! - 登录、筛选、逐条预订、核对、汇总
//!
//! ### `aggregator` - 去重汇集
//!
//! ## 层次关系
//!
//! ```text
//! app (持有 Browser)
//!     ↓
//! gym_booker (处理 Vec<BookingRequest>)
//!     ↓
//! workflow::BookingFlow (处理单条请求)
//!     ↓
//! services (能力层：定位 / 预订 / 分类 / 核对 / 汇总)
//!     ↓
//! infrastructure (基础设施：SessionSurface)
//! ```

pub mod aggregator;
pub mod app;
pub mod gym_booker;

pub use aggregator::DedupAggregator;
pub use app::App;
pub use gym_booker::GymBooker;
