//! 预订相关的数据模型

use serde::{Deserialize, Serialize};
use std::fmt;

/// 一条预订请求（星期几 + 时间）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub day: String,
    pub time: String,
}

impl BookingRequest {
    pub fn new(day: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            time: time.into(),
        }
    }
}

impl fmt::Display for BookingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.time)
    }
}

/// 页面上匹配到的课程
///
/// `control` 是会话层的元素句柄，页面变化后即失效，不要跨请求保存。
#[derive(Debug, Clone)]
pub struct ClassSlot<H> {
    pub name: String,
    pub time: String,
    pub control: H,
}

/// 某一天的课程分组
#[derive(Debug, Clone)]
pub struct DaySection<H> {
    pub title: String,
    pub section: H,
}

/// 预订按钮的状态，由按钮文字解析
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonState {
    BookClass,
    JoinWaitlist,
    Booked,
    Waitlisted,
    /// 无法识别的按钮文字（保留原文）
    Unknown(String),
}

impl ButtonState {
    /// 按钮文字解析（忽略大小写和首尾空白）
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "book class" => ButtonState::BookClass,
            "join waitlist" => ButtonState::JoinWaitlist,
            "booked" => ButtonState::Booked,
            "waitlisted" => ButtonState::Waitlisted,
            _ => ButtonState::Unknown(label.trim().to_string()),
        }
    }

    /// 已经处于预订 / 候补状态，不需要再点击
    pub fn is_resolved(&self) -> bool {
        matches!(self, ButtonState::Booked | ButtonState::Waitlisted)
    }
}

impl fmt::Display for ButtonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonState::BookClass => write!(f, "book class"),
            ButtonState::JoinWaitlist => write!(f, "join waitlist"),
            ButtonState::Booked => write!(f, "booked"),
            ButtonState::Waitlisted => write!(f, "waitlisted"),
            ButtonState::Unknown(text) => write!(f, "{}", text),
        }
    }
}

/// 单条请求的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Booked,
    Waitlisted,
    AlreadyBooked,
    AlreadyWaitlisted,
    NotFound,
    Error,
}

impl OutcomeStatus {
    /// not_found / error 不参与去重和统计
    pub fn is_failure(self) -> bool {
        matches!(self, OutcomeStatus::NotFound | OutcomeStatus::Error)
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            OutcomeStatus::Booked => "booked",
            OutcomeStatus::Waitlisted => "waitlisted",
            OutcomeStatus::AlreadyBooked => "already_booked",
            OutcomeStatus::AlreadyWaitlisted => "already_waitlisted",
            OutcomeStatus::NotFound => "not_found",
            OutcomeStatus::Error => "error",
        };
        write!(f, "{}", text)
    }
}

/// 分类后的预订记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub status: OutcomeStatus,
    /// `"<课程名> for <时间> by <日期标题>"`，去重和核对的依据
    pub identifier: String,
    pub message: String,
}

impl BookingRecord {
    pub fn new(status: OutcomeStatus, identifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            identifier: identifier.into(),
            message: message.into(),
        }
    }

    /// 未找到 / 校验失败的记录，identifier 使用请求本身
    pub fn not_found(request: &BookingRequest, message: impl Into<String>) -> Self {
        Self::new(OutcomeStatus::NotFound, request.to_string(), message)
    }

    /// 构造课程标识
    pub fn identifier_for(name: &str, time: &str, day_title: &str) -> String {
        format!("{} for {} by {}", name, time, day_title)
    }
}

/// 全部记录 + 按标识去重后的记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregatedResult {
    pub all: Vec<BookingRecord>,
    pub unique_by_identifier: Vec<BookingRecord>,
}

/// 预订汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub new_bookings: usize,
    pub new_waitlists: usize,
    pub already_processed: usize,
    pub total_processed: usize,
}
