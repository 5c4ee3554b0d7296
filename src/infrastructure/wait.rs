//! 有界等待
//!
//! 所有挂起点都是"等到条件成立或超时"，超时时间固定。

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::config::Timing;
use crate::error::{BookingError, BookingResult};
use crate::infrastructure::session_surface::{Scope, SessionSurface};

/// 轮询 `predicate` 直到返回 `true` 或超时
///
/// 超时返回 `Ok(false)`；`predicate` 自身的错误直接向上传递。
pub async fn wait_until<F, Fut>(
    timeout: Duration,
    poll_interval: Duration,
    mut predicate: F,
) -> BookingResult<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = BookingResult<bool>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if predicate().await? {
            return Ok(true);
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(false);
        }
        sleep(poll_interval.min(deadline - now)).await;
    }
}

/// 等待元素出现，超时视为瞬时错误（可重试）
pub async fn wait_for_element<S: SessionSurface>(
    surface: &S,
    scope: Scope<'_, S::Handle>,
    selector: &str,
    timing: &Timing,
) -> BookingResult<S::Handle> {
    let deadline = Instant::now() + timing.wait_timeout;
    loop {
        if let Some(handle) = surface.locate(scope, selector).await? {
            return Ok(handle);
        }
        let now = Instant::now();
        if now >= deadline {
            debug!("等待元素超时: {}", selector);
            return Err(BookingError::timeout(format!("元素未出现: {}", selector)));
        }
        sleep(timing.poll_interval.min(deadline - now)).await;
    }
}
