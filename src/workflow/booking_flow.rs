//! 单条预订请求的处理流程 - 流程层
//!
//! 流程顺序：
//! 1. 重试包装下：定位分组 → 定位课程 → 读取按钮状态 → 点击并等待
//! 2. 按点击前状态分类
//! 3. 未找到 / 校验失败转换为 not_found 记录，不中断运行

use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::Timing;
use crate::error::BookingResult;
use crate::infrastructure::SessionSurface;
use crate::models::BookingRecord;
use crate::services::{classify, BookingAttempter, RetryExecutor};
use crate::workflow::booking_ctx::BookingCtx;

/// 单条请求的处理流程
///
/// - 决定何时重试、何时转为 not_found
/// - 只有重试耗尽才向上返回错误
pub struct BookingFlow<'a, S: SessionSurface> {
    retry: RetryExecutor,
    attempter: BookingAttempter<'a, S>,
    timing: &'a Timing,
}

impl<'a, S: SessionSurface> BookingFlow<'a, S> {
    pub fn new(surface: &'a S, timing: &'a Timing) -> Self {
        Self {
            retry: RetryExecutor::from_timing(timing),
            attempter: BookingAttempter::new(surface, timing),
            timing,
        }
    }

    pub async fn run(&self, ctx: &BookingCtx<'_>) -> BookingResult<BookingRecord> {
        info!("{} 🔍 开始预订", ctx);

        let attempter = &self.attempter;
        let day = ctx.request.day.as_str();
        let time = ctx.request.time.as_str();

        let record = match self
            .retry
            .run("booking", move || attempter.attempt(day, time))
            .await
        {
            Ok(attempt) => {
                let record = classify(&attempt.slot, &attempt.section, &attempt.initial_state);
                // 等页面稳定后再处理下一条
                sleep(self.timing.settle_delay).await;
                record
            }
            Err(e) if e.is_recoverable() => {
                warn!("{} ⚠️ {}", ctx, e);
                BookingRecord::not_found(ctx.request, e.to_string())
            }
            Err(e) => return Err(e),
        };

        info!("{} {}", ctx, record.message);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookingError;
    use crate::infrastructure::mock_surface::ClickAction;
    use crate::infrastructure::MockSurface;
    use crate::models::{BookingRequest, OutcomeStatus};
    use std::time::Duration;

    fn create_test_timing() -> Timing {
        Timing {
            max_retries: 3,
            retry_delay: Duration::from_millis(1),
            wait_timeout: Duration::from_millis(10),
            poll_interval: Duration::from_millis(2),
            settle_delay: Duration::from_millis(0),
        }
    }

    #[tokio::test]
    async fn test_new_booking() {
        let surface = MockSurface::new();
        let day = surface.add_day("Thu, Aug 7");
        surface.add_class(day, "Spin Class", "Time: 6:00 PM", "Book Class");
        let timing = create_test_timing();
        let request = BookingRequest::new("Thu", "6:00");

        let flow = BookingFlow::new(&surface, &timing);
        let record = flow.run(&BookingCtx::new(&request, 1, 1)).await.unwrap();

        assert_eq!(record.status, OutcomeStatus::Booked);
        assert_eq!(record.identifier, "Spin Class for 6:00 PM by Thu, Aug 7");
    }

    #[tokio::test]
    async fn test_missing_day_becomes_not_found() {
        let surface = MockSurface::new();
        surface.add_day("Thu, Aug 7");
        let timing = create_test_timing();
        let request = BookingRequest::new("Sun", "6:00");

        let flow = BookingFlow::new(&surface, &timing);
        let record = flow.run(&BookingCtx::new(&request, 1, 1)).await.unwrap();

        assert_eq!(record.status, OutcomeStatus::NotFound);
        assert_eq!(record.message, "No section for Sun");
    }

    #[tokio::test]
    async fn test_slow_button_is_retried_then_seen_as_booked() {
        let surface = MockSurface::new();
        let day = surface.add_day("Fri, Aug 8");
        let button = surface.add_class(day, "Yoga", "Time: 8:00 AM", "Book Class");
        surface.set_on_click(
            button,
            ClickAction {
                set_text: Some("Booked".into()),
                reveal: vec![],
                ignore_first: 1,
            },
        );
        let timing = create_test_timing();
        let request = BookingRequest::new("Fri", "8:00");

        let flow = BookingFlow::new(&surface, &timing);
        let record = flow.run(&BookingCtx::new(&request, 1, 1)).await.unwrap();

        // 第二次尝试时重新定位，点击后成功，点击前状态仍为 book class
        assert_eq!(record.status, OutcomeStatus::Booked);
        assert_eq!(surface.click_count(button), 2);
    }

    #[tokio::test]
    async fn test_exhausted_retries_abort() {
        let surface = MockSurface::new();
        let day = surface.add_day("Fri, Aug 8");
        let button = surface.add_class(day, "Yoga", "Time: 8:00 AM", "Book Class");
        surface.set_on_click(button, ClickAction::default());
        let timing = create_test_timing();
        let request = BookingRequest::new("Fri", "8:00");

        let flow = BookingFlow::new(&surface, &timing);
        let err = flow.run(&BookingCtx::new(&request, 1, 1)).await.unwrap_err();

        assert!(matches!(err, BookingError::Terminal { ref description, .. } if description == "booking"));
        assert_eq!(surface.click_count(button), 3);
    }
}
