//! 预订尝试服务 - 业务能力层
//!
//! 只负责把"一节课"推进到已预订 / 已候补，不关心去重和统计。

use tracing::{debug, info};

use crate::config::Timing;
use crate::error::{BookingError, BookingResult};
use crate::infrastructure::{wait_until, SessionSurface};
use crate::models::{ButtonState, ClassSlot, DaySection};
use crate::services::slot_resolver::SlotResolver;

/// 一次尝试的结果
#[derive(Debug, Clone)]
pub struct Attempt<H> {
    pub slot: ClassSlot<H>,
    pub section: DaySection<H>,
    /// 点击之前的按钮状态
    pub initial_state: ButtonState,
}

/// 预订尝试服务
pub struct BookingAttempter<'a, S: SessionSurface> {
    surface: &'a S,
    resolver: SlotResolver<'a, S>,
    timing: &'a Timing,
}

impl<'a, S: SessionSurface> BookingAttempter<'a, S> {
    pub fn new(surface: &'a S, timing: &'a Timing) -> Self {
        Self {
            surface,
            resolver: SlotResolver::new(surface),
            timing,
        }
    }

    /// 尝试预订 `day` `time` 的课程
    ///
    /// # 返回
    /// - 校验失败 / 未找到：`Validation` / `NotFound` 错误（不重试）
    /// - 按钮已是 booked / waitlisted：直接返回，不点击
    /// - 点击后按钮状态未在超时内变化：`TransientTimeout`（由调用方整体重试）
    pub async fn attempt(&self, day: &str, time: &str) -> BookingResult<Attempt<S::Handle>> {
        if day.trim().is_empty() || time.trim().is_empty() {
            return Err(BookingError::validation("No time or day specified"));
        }

        let section = self
            .resolver
            .resolve_section(day)
            .await?
            .ok_or_else(|| BookingError::not_found(format!("No section for {}", day)))?;

        let slot = self
            .resolver
            .resolve_slot(&section, time)
            .await?
            .ok_or_else(|| {
                BookingError::not_found(format!(
                    "No available classes found for {} on {}.",
                    time, day
                ))
            })?;

        let label = self.surface.read_text(&slot.control).await?;
        let initial_state = ButtonState::from_label(&label);
        debug!("{} {} 按钮初始状态: {}", slot.name, slot.time, initial_state);

        if initial_state.is_resolved() {
            return Ok(Attempt {
                slot,
                section,
                initial_state,
            });
        }

        info!("🖱️ 点击预订按钮: {} ({})", slot.name, section.title);
        self.surface.click(&slot.control).await?;

        let surface = self.surface;
        let control = &slot.control;
        let changed = wait_until(self.timing.wait_timeout, self.timing.poll_interval, move || async move {
            let text = surface.read_text(control).await?;
            Ok::<_, BookingError>(ButtonState::from_label(&text).is_resolved())
        })
        .await?;

        if !changed {
            return Err(BookingError::timeout(
                "Warning: Button state did not change after click!",
            ));
        }

        Ok(Attempt {
            slot,
            section,
            initial_state,
        })
    }
}
