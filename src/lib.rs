//! # Gym Booker
//!
//! 自动预订健身课程，并与"我的预订"页核对结果的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露会话能力
//! - `SessionSurface` - 导航 / 查找 / 点击 / 读写文字
//! - `CdpSurface` - 基于 chromiumoxide 的实现；`MockSurface` - 内存实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单条请求或单个页面
//! - `RetryExecutor` - 有界重试
//! - `SlotResolver` / `BookingAttempter` - 定位课程并预订
//! - `classify` / `verify` / `summarize` - 分类、核对、汇总
//!
//! ### ③ 流程层（Workflow）
//! - `BookingFlow` - 单条请求：重试预订 → 分类 → 转换 not_found
//!
//! ### ④ 编排层（Orchestration）
//! - `GymBooker` - 登录、逐条预订、去重、核对、汇总
//! - `App` - 启动浏览器、加载请求、输出报告

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, Timing};
pub use error::{BookingError, BookingResult};
pub use infrastructure::{CdpSurface, MockSurface, Scope, SessionSurface};
pub use models::{AggregatedResult, BookingRecord, BookingRequest, ButtonState, OutcomeStatus, Summary};
pub use orchestrator::{App, GymBooker};
pub use services::{RunReport, VerificationReport};
pub use workflow::{BookingCtx, BookingFlow};
