//! 课程定位服务 - 业务能力层
//!
//! 每次请求都重新查找，不缓存句柄（上一次点击可能已经改变页面）。

use tracing::{debug, warn};

use crate::error::{BookingError, BookingResult};
use crate::infrastructure::selectors;
use crate::infrastructure::{Scope, SessionSurface};
use crate::models::{ClassSlot, DaySection};

/// 课程定位服务
///
/// 职责：
/// - 按星期找到当天的课程分组
/// - 在分组中按时间找到课程和预订按钮
/// - 跳过格式错误的元素
pub struct SlotResolver<'a, S: SessionSurface> {
    surface: &'a S,
}

impl<'a, S: SessionSurface> SlotResolver<'a, S> {
    pub fn new(surface: &'a S) -> Self {
        Self { surface }
    }

    /// 按文档顺序找到第一个标题包含 `day` 的分组
    pub async fn resolve_section(&self, day: &str) -> BookingResult<Option<DaySection<S::Handle>>> {
        let groups = self
            .surface
            .locate_all(Scope::Document, selectors::DAY_GROUP)
            .await?;
        debug!("找到 {} 个日期分组", groups.len());

        for group in groups {
            let Some(title_element) = self
                .surface
                .locate(Scope::Within(&group), selectors::DAY_TITLE)
                .await?
            else {
                warn!("{}", BookingError::malformed("日期分组缺少标题，已跳过"));
                continue;
            };

            let title = self.surface.read_text(&title_element).await?.trim().to_string();
            if title.contains(day) {
                return Ok(Some(DaySection {
                    title,
                    section: group,
                }));
            }
        }

        Ok(None)
    }

    /// 找到时间文字包含 `time` 的课程
    ///
    /// 多个课程匹配时取文档顺序中的最后一个。
    pub async fn resolve_slot(
        &self,
        section: &DaySection<S::Handle>,
        time: &str,
    ) -> BookingResult<Option<ClassSlot<S::Handle>>> {
        let cards = self
            .surface
            .locate_all(Scope::Within(&section.section), selectors::CLASS_CARD)
            .await?;

        let mut matched = None;
        for card in cards {
            let Some(time_element) = self
                .surface
                .locate(Scope::Within(&card), selectors::CLASS_TIME)
                .await?
            else {
                warn!("{}", BookingError::malformed("课程卡片缺少时间，已跳过"));
                continue;
            };

            let class_time = self.surface.read_text(&time_element).await?;
            if !class_time.contains(time) {
                continue;
            }

            let name_element = self
                .surface
                .locate(Scope::Within(&card), selectors::CLASS_NAME)
                .await?;
            let button = self
                .surface
                .locate(Scope::Within(&card), selectors::BOOK_BUTTON)
                .await?;

            match (name_element, button) {
                (Some(name_element), Some(button)) => {
                    let name = self.surface.read_text(&name_element).await?.trim().to_string();
                    matched = Some(ClassSlot {
                        name,
                        time: strip_time_label(&class_time),
                        control: button,
                    });
                }
                _ => warn!("{}", BookingError::malformed("课程卡片缺少名称或按钮，已跳过")),
            }
        }

        Ok(matched)
    }
}

/// 去掉时间文字的第一个词（`"Time: 6:00 PM"` → `"6:00 PM"`）
pub fn strip_time_label(class_time: &str) -> String {
    class_time
        .split_whitespace()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{MockNode, MockSurface};

    #[test]
    fn test_strip_time_label() {
        assert_eq!(strip_time_label("Time: 6:00 PM"), "6:00 PM");
        assert_eq!(strip_time_label("  Time:   8:00  AM "), "8:00 AM");
        assert_eq!(strip_time_label("6:00"), "");
    }

    #[tokio::test]
    async fn test_first_matching_section_wins() {
        let surface = MockSurface::new();
        surface.add_day("Thu, Aug 7");
        let first_fri = surface.add_day("Fri, Aug 8");
        surface.add_day("Fri, Aug 15");

        let resolver = SlotResolver::new(&surface);
        let section = resolver.resolve_section("Fri").await.unwrap().unwrap();
        assert_eq!(section.title, "Fri, Aug 8");
        assert_eq!(section.section, first_fri);
    }

    #[tokio::test]
    async fn test_missing_section() {
        let surface = MockSurface::new();
        surface.add_day("Thu, Aug 7");
        let resolver = SlotResolver::new(&surface);
        assert!(resolver.resolve_section("Sun").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_section_without_title_is_skipped() {
        let surface = MockSurface::new();
        surface.add(surface.root(), MockNode::new("day-group-broken"));
        surface.add_day("Mon, Aug 4");

        let resolver = SlotResolver::new(&surface);
        let section = resolver.resolve_section("Mon").await.unwrap().unwrap();
        assert_eq!(section.title, "Mon, Aug 4");
    }

    #[tokio::test]
    async fn test_last_matching_slot_wins() {
        let surface = MockSurface::new();
        let day = surface.add_day("Tue, Aug 5");
        surface.add_class(day, "Yoga", "Time: 6:00 AM", "Book Class");
        surface.add_class(day, "Spin", "Time: 8:00 AM", "Book Class");
        let last = surface.add_class(day, "HIIT", "Time: 6:00 PM", "Book Class");

        let resolver = SlotResolver::new(&surface);
        let section = resolver.resolve_section("Tue").await.unwrap().unwrap();
        let slot = resolver.resolve_slot(&section, "6:00").await.unwrap().unwrap();

        assert_eq!(slot.name, "HIIT");
        assert_eq!(slot.time, "6:00 PM");
        assert_eq!(slot.control, last);
    }

    #[tokio::test]
    async fn test_malformed_slot_is_skipped() {
        let surface = MockSurface::new();
        let day = surface.add_day("Wed, Aug 6");
        surface.add_class(day, "Yoga", "Time: 6:00 AM", "Book Class");
        // 时间匹配但缺少按钮
        let broken = surface.add(day, MockNode::new("class-card-broken"));
        surface.add(broken, MockNode::new("class-time-broken").text("Time: 6:00 PM"));
        surface.add(broken, MockNode::new("class-name-broken").text("Boxing"));

        let resolver = SlotResolver::new(&surface);
        let section = resolver.resolve_section("Wed").await.unwrap().unwrap();
        let slot = resolver.resolve_slot(&section, "6:00").await.unwrap().unwrap();
        assert_eq!(slot.name, "Yoga");
    }

    #[tokio::test]
    async fn test_card_without_time_is_skipped() {
        let surface = MockSurface::new();
        let day = surface.add_day("Wed, Aug 6");
        let broken = surface.add(day, MockNode::new("class-card-broken"));
        surface.add(broken, MockNode::new("class-name-broken").text("Boxing"));
        surface.add(broken, MockNode::new("book-button-broken").text("Book Class"));
        surface.add_class(day, "Yoga", "Time: 6:00 AM", "Book Class");

        let resolver = SlotResolver::new(&surface);
        let section = resolver.resolve_section("Wed").await.unwrap().unwrap();
        let slot = resolver.resolve_slot(&section, "6:00").await.unwrap().unwrap();
        assert_eq!(slot.name, "Yoga");
    }

    #[tokio::test]
    async fn test_no_matching_slot() {
        let surface = MockSurface::new();
        let day = surface.add_day("Wed, Aug 6");
        surface.add_class(day, "Yoga", "Time: 6:00 AM", "Book Class");

        let resolver = SlotResolver::new(&surface);
        let section = resolver.resolve_section("Wed").await.unwrap().unwrap();
        assert!(resolver.resolve_slot(&section, "9:00").await.unwrap().is_none());
    }
}
