//! 应用入口 - 编排层
//!
//! 唯一持有 Browser 的模块。

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chromiumoxide::Browser;
use tracing::{info, warn};

use crate::browser;
use crate::config::Config;
use crate::infrastructure::CdpSurface;
use crate::models::load_booking_requests;
use crate::orchestrator::gym_booker::GymBooker;
use crate::services::RunReport;
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    // 保持浏览器连接存活
    _browser: Browser,
    surface: CdpSurface,
}

impl App {
    /// 初始化应用：校验配置并启动 / 连接浏览器
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;
        logging::log_startup(&config);

        let (browser, page) = match config.browser_debug_port {
            Some(port) => {
                browser::connect_to_browser_and_page(port, config.page_title_match.as_deref())
                    .await
                    .with_context(|| format!("无法连接到浏览器 (端口: {})", port))?
            }
            None => browser::launch_browser(config.headless, &config.user_data_dir)
                .await
                .context("启动浏览器失败")?,
        };

        Ok(Self {
            config,
            _browser: browser,
            surface: CdpSurface::new(page),
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunReport> {
        let started = Instant::now();

        let requests_path = Path::new(&self.config.requests_file);
        let requests = load_booking_requests(requests_path)
            .await
            .with_context(|| format!("无法加载预订请求: {}", requests_path.display()))?;

        if requests.is_empty() {
            warn!("⚠️ 没有预订请求，仍将登录并核对现有预订");
        }

        let report = GymBooker::new(&self.surface, &self.config)
            .run(&requests)
            .await?;

        if let Some(path) = &self.config.report_json_path {
            report.write_json(Path::new(path)).await?;
        }

        logging::print_final_stats(&report, started.elapsed());
        if !report.verification.is_success() {
            info!("💡 核对按课程名和数量进行，请在\"我的预订\"页人工确认");
        }

        Ok(report)
    }
}
