//! 重试执行器 - 业务能力层
//!
//! 只对瞬时超时重试，其他错误立即向上传递。

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::Timing;
use crate::error::{BookingError, BookingResult};

/// 有界重试（固定间隔，不做指数退避）
#[derive(Debug, Clone)]
pub struct RetryExecutor {
    max_attempts: usize,
    delay: Duration,
}

impl RetryExecutor {
    pub fn new(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    pub fn from_timing(timing: &Timing) -> Self {
        Self::new(timing.max_retries, timing.retry_delay)
    }

    /// 执行 `operation`，最多 `max_attempts` 次
    ///
    /// # 返回
    /// - 任意一次成功即返回结果
    /// - 非超时错误立即返回
    /// - 全部超时后返回 [`BookingError::Terminal`]，带上 `description`
    pub async fn run<T, F, Fut>(&self, description: &str, mut operation: F) -> BookingResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = BookingResult<T>>,
    {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            info!("Trying {}. Attempt {}.", description, attempt);

            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() => {
                    warn!(
                        "⚠️ {} 超时 (尝试 {}/{}): {}",
                        description, attempt, self.max_attempts, e
                    );
                    last_error = Some(e);
                    if attempt < self.max_attempts {
                        sleep(self.delay).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(BookingError::Terminal {
            description: description.to_string(),
            attempts: self.max_attempts,
            last: last_error.map(|e| e.to_string()).unwrap_or_default(),
        })
    }
}
