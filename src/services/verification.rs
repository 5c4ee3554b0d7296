//! 预订核对 - 业务能力层
//!
//! 用"我的预订"页上的课程名核对本次运行期望的预订。
//! 核对按课程名集合的交集和卡片数量进行，不是逐条一一对应：
//! 同名的两节课可能掩盖一条缺失的预订。

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::warn;

use crate::error::{BookingError, BookingResult};
use crate::infrastructure::selectors;
use crate::infrastructure::{Scope, SessionSurface};
use crate::models::BookingRecord;

/// 核对结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// 两边都出现的课程名
    pub verified: BTreeSet<String>,
    /// 期望的（去重后）预订数量
    pub expected_count: usize,
    /// 页面上的预订 + 候补卡片数量
    pub found_count: usize,
}

impl VerificationReport {
    pub fn new(verified: BTreeSet<String>, expected_count: usize, found_count: usize) -> Self {
        Self {
            verified,
            expected_count,
            found_count,
        }
    }

    /// 期望数量 - 实际卡片数量（可能为负）
    pub fn mismatch(&self) -> i64 {
        self.expected_count as i64 - self.found_count as i64
    }

    pub fn is_success(&self) -> bool {
        self.mismatch() == 0
    }

    pub fn verdict(&self) -> String {
        if self.is_success() {
            "✅ SUCCESS: All bookings verified".to_string()
        } else {
            format!("❌ MISMATCH: Missing {} bookings", self.mismatch())
        }
    }
}

/// 取标识的前两个词作为近似课程名
pub fn expected_names(expected: &[BookingRecord]) -> BTreeSet<String> {
    expected
        .iter()
        .map(|record| {
            record
                .identifier
                .split_whitespace()
                .take(2)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// 读取卡片中的课程名，缺少课程名的卡片跳过
pub async fn collect_class_names<S: SessionSurface>(
    surface: &S,
    cards: &[S::Handle],
    name_selector: &str,
) -> BookingResult<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    for card in cards {
        match surface.locate(Scope::Within(card), name_selector).await? {
            Some(name_element) => {
                names.insert(surface.read_text(&name_element).await?.trim().to_string());
            }
            None => warn!(
                "{}",
                BookingError::malformed(format!("卡片缺少课程名 {}，已跳过", name_selector))
            ),
        }
    }
    Ok(names)
}

/// 期望课程名与页面课程名的交集
pub async fn verify<S: SessionSurface>(
    surface: &S,
    expected: &[BookingRecord],
    booking_cards: &[S::Handle],
    waitlist_cards: &[S::Handle],
) -> BookingResult<BTreeSet<String>> {
    let expected = expected_names(expected);

    let mut found =
        collect_class_names(surface, booking_cards, selectors::BOOKING_CLASS_NAME).await?;
    found.extend(
        collect_class_names(surface, waitlist_cards, selectors::WAITLIST_CLASS_NAME).await?,
    );

    Ok(expected.intersection(&found).cloned().collect())
}
