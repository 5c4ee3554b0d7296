//! 预订编排器 - 编排层
//!
//! ## 职责
//!
//! 1. **登录**：重试包装下提交凭据，等待课程表出现
//! 2. **筛选**：按课程类型筛选课程表
//! 3. **逐条预订**：严格按请求顺序，一次只处理一条
//! 4. **去重汇集**：全部记录 + 去重记录
//! 5. **核对**：进入"我的预订"页，与期望的预订对比
//! 6. **汇总**：生成统计和明细，输出报告

use tracing::info;

use crate::config::Config;
use crate::error::{BookingError, BookingResult};
use crate::infrastructure::SessionSurface;
use crate::models::{AggregatedResult, BookingRequest};
use crate::orchestrator::aggregator::DedupAggregator;
use crate::services::{
    open_bookings_page, summarize, verify, LoginService, RetryExecutor, RunReport,
    VerificationReport,
};
use crate::utils::logging;
use crate::workflow::{BookingCtx, BookingFlow};

/// 预订编排器
///
/// 会话作为显式依赖传入，编排器不持有浏览器。
pub struct GymBooker<'a, S: SessionSurface> {
    surface: &'a S,
    config: &'a Config,
    retry: RetryExecutor,
}

impl<'a, S: SessionSurface> GymBooker<'a, S> {
    pub fn new(surface: &'a S, config: &'a Config) -> Self {
        Self {
            surface,
            config,
            retry: RetryExecutor::from_timing(&config.timing),
        }
    }

    /// 完整运行：登录 → 筛选 → 逐条预订 → 核对 → 汇总
    ///
    /// 只有重试耗尽（或会话本身出错）才会中断运行。
    pub async fn run(&self, requests: &[BookingRequest]) -> BookingResult<RunReport> {
        logging::log_run_start(requests.len(), &self.config.target_url);

        self.surface.navigate(&self.config.target_url).await?;
        self.login().await?;

        if self.config.apply_class_filter {
            let login = LoginService::new(self.surface, &self.config.timing);
            self.retry
                .run("class filter", || login.apply_class_filter())
                .await?;
        }

        let aggregated = self.process_requests(requests).await?;
        let verification = self.verify_bookings(&aggregated).await?;
        let (summary, details) = summarize(&aggregated.all);

        let report = RunReport {
            aggregated,
            verification,
            summary,
            details,
        };
        report.log();
        Ok(report)
    }

    pub async fn login(&self) -> BookingResult<()> {
        let login = LoginService::new(self.surface, &self.config.timing);
        let email = self.config.email.as_str();
        let password = self.config.password.as_str();
        self.retry
            .run("login", || login.login(email, password))
            .await
    }

    /// 按顺序处理全部请求
    pub async fn process_requests(
        &self,
        requests: &[BookingRequest],
    ) -> BookingResult<AggregatedResult> {
        let flow = BookingFlow::new(self.surface, &self.config.timing);
        let mut aggregator = DedupAggregator::new();

        for (index, request) in requests.iter().enumerate() {
            let ctx = BookingCtx::new(request, index + 1, requests.len());
            let record = flow.run(&ctx).await?;
            aggregator.push(record);
        }

        let aggregated = aggregator.finish();
        info!(
            "✓ 请求处理完成: 共 {} 条, 去重后 {} 条",
            aggregated.all.len(),
            aggregated.unique_by_identifier.len()
        );
        Ok(aggregated)
    }

    /// 进入"我的预订"页核对去重后的预订
    pub async fn verify_bookings(
        &self,
        aggregated: &AggregatedResult,
    ) -> BookingResult<VerificationReport> {
        let surface = self.surface;
        let timing = &self.config.timing;
        let expected = aggregated.unique_by_identifier.as_slice();

        self.retry
            .run("bookings page", move || async move {
                let listing = open_bookings_page(surface, timing, !expected.is_empty()).await?;
                let verified = verify(
                    surface,
                    expected,
                    &listing.booking_cards,
                    &listing.waitlist_cards,
                )
                .await?;
                Ok::<_, BookingError>(VerificationReport::new(
                    verified,
                    expected.len(),
                    listing.total(),
                ))
            })
            .await
    }
}
