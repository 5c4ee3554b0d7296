//! 预订请求上下文
//!
//! 封装"我正在处理第几条请求"这一信息

use std::fmt::Display;

use crate::models::BookingRequest;

/// 预订请求上下文
#[derive(Debug, Clone)]
pub struct BookingCtx<'a> {
    pub request: &'a BookingRequest,

    /// 请求序号（从1开始，仅用于日志显示）
    pub request_index: usize,

    pub total: usize,
}

impl<'a> BookingCtx<'a> {
    pub fn new(request: &'a BookingRequest, request_index: usize, total: usize) -> Self {
        Self {
            request,
            request_index,
            total,
        }
    }
}

impl Display for BookingCtx<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[请求 {}/{} {} {}]",
            self.request_index, self.total, self.request.day, self.request.time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let request = BookingRequest::new("Fri", "6:00");
        let ctx = BookingCtx::new(&request, 2, 4);
        assert_eq!(ctx.to_string(), "[请求 2/4 Fri 6:00]");
    }
}
