use crate::error::{BookingError, BookingResult};
use crate::models::booking::BookingRequest;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// 请求文件格式：
///
/// ```toml
/// [[booking]]
/// day = "Thu"
/// time = "6:00"
/// ```
#[derive(Debug, Deserialize)]
struct RequestsFile {
    #[serde(default)]
    booking: Vec<BookingRequest>,
}

/// 解析 TOML 文本为请求列表（保留顺序和重复项）
pub fn parse_booking_requests(content: &str) -> BookingResult<Vec<BookingRequest>> {
    let file: RequestsFile = toml::from_str(content)?;
    Ok(file.booking)
}

/// 从 TOML 文件加载预订请求
pub async fn load_booking_requests(path: &Path) -> BookingResult<Vec<BookingRequest>> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| BookingError::io(path.display().to_string(), e))?;

    let requests = parse_booking_requests(&content)?;
    tracing::info!(
        "成功加载 {} 条预订请求: {}",
        requests.len(),
        path.file_name().unwrap_or_default().to_string_lossy()
    );

    if requests.is_empty() {
        tracing::warn!("请求文件中没有 [[booking]] 条目: {}", path.display());
    }

    Ok(requests)
}
