//! 内存中的会话实现，用于单元测试和集成测试
//!
//! 支持的选择器：`#id`（完全匹配）、`[id^="prefix"]`（前缀匹配），
//! 其他选择器按字面值与节点 id 比较。

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{BookingError, BookingResult};
use crate::infrastructure::selectors;
use crate::infrastructure::session_surface::{Scope, SessionSurface};

/// 点击后的行为
#[derive(Debug, Clone, Default)]
pub struct ClickAction {
    /// 点击后按钮文字变为
    pub set_text: Option<String>,
    /// 点击后显示的节点
    pub reveal: Vec<usize>,
    /// 前 N 次点击不生效（模拟页面迟迟不响应）
    pub ignore_first: usize,
}

/// 模拟节点
#[derive(Debug, Clone, Default)]
pub struct MockNode {
    pub id: String,
    pub text: String,
    pub value: String,
    pub visible: bool,
    pub on_click: Option<ClickAction>,
    children: Vec<usize>,
}

impl MockNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            visible: true,
            ..Default::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn on_click(mut self, action: ClickAction) -> Self {
        self.on_click = Some(action);
        self
    }
}

#[derive(Debug, Default)]
struct MockState {
    nodes: Vec<MockNode>,
    clicks: Vec<usize>,
    call_history: Vec<String>,
    next_id: usize,
}

/// 模拟会话
///
/// 节点 0 为文档根；句柄即节点下标。
#[derive(Debug)]
pub struct MockSurface {
    state: Mutex<MockState>,
}

impl Default for MockSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSurface {
    pub fn new() -> Self {
        let state = MockState {
            nodes: vec![MockNode::new("document")],
            ..Default::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn root(&self) -> usize {
        0
    }

    /// 在 `parent` 下添加节点，返回新节点句柄
    pub fn add(&self, parent: usize, node: MockNode) -> usize {
        let mut state = self.lock();
        let index = state.nodes.len();
        state.nodes.push(node);
        state.nodes[parent].children.push(index);
        index
    }

    pub fn set_on_click(&self, handle: usize, action: ClickAction) {
        self.lock().nodes[handle].on_click = Some(action);
    }

    pub fn text_of(&self, handle: usize) -> String {
        self.lock().nodes[handle].text.clone()
    }

    pub fn value_of(&self, handle: usize) -> String {
        self.lock().nodes[handle].value.clone()
    }

    /// 某个节点被点击的次数
    pub fn click_count(&self, handle: usize) -> usize {
        self.lock().clicks.iter().filter(|&&h| h == handle).count()
    }

    pub fn history(&self) -> Vec<String> {
        self.lock().call_history.clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.lock().call_history.iter().any(|c| c.starts_with(method))
    }

    fn unique_id(&self, prefix: &str) -> String {
        let mut state = self.lock();
        state.next_id += 1;
        format!("{}-{}", prefix, state.next_id)
    }

    // ========== 健身房页面构造 ==========

    /// 登录页、课程筛选和"我的预订"入口
    pub fn add_login_flow(&self) {
        let root = self.root();
        let schedule = self.add(root, MockNode::new("schedule-page").hidden());
        self.add(root, MockNode::new("login-button").text("Login"));
        self.add(root, MockNode::new("email-input"));
        self.add(root, MockNode::new("password-input"));
        self.add(
            root,
            MockNode::new("submit-button").on_click(ClickAction {
                reveal: vec![schedule],
                ..Default::default()
            }),
        );
        let filter = self.add(root, MockNode::new("type-filter"));
        self.add(filter, MockNode::new(selectors::TYPE_FILTER_OPTION).text("Spin"));
        self.add(root, MockNode::new("my-bookings-link").text("My Bookings"));
    }

    /// 添加一天的课程分组，返回分组句柄
    pub fn add_day(&self, title: &str) -> usize {
        let group_id = self.unique_id("day-group");
        let title_id = self.unique_id("day-title");
        let group = self.add(self.root(), MockNode::new(group_id));
        self.add(group, MockNode::new(title_id).text(title));
        group
    }

    /// 添加一节课程，返回预订按钮句柄
    ///
    /// `time_text` 为页面上的完整时间文字（如 `"Time: 6:00 PM"`）。
    /// 点击 "Book Class" / "Join Waitlist" 会更新按钮文字并在"我的预订"中显示对应卡片；
    /// 初始为 "Booked" / "Waitlisted" 的课程卡片直接可见。
    pub fn add_class(&self, day: usize, name: &str, time_text: &str, label: &str) -> usize {
        let card = self.add(day, MockNode::new(self.unique_id("class-card")));
        self.add(card, MockNode::new(self.unique_id("class-name")).text(name));
        self.add(card, MockNode::new(self.unique_id("class-time")).text(time_text));
        let button = self.add(card, MockNode::new(self.unique_id("book-button")).text(label));

        let lower = label.to_lowercase();
        let waitlist = lower == "join waitlist" || lower == "waitlisted";
        let listed = lower == "booked" || lower == "waitlisted";
        let listing = self.add_listing_card(name, waitlist, listed);

        let set_text = if waitlist { "Waitlisted" } else { "Booked" };
        self.set_on_click(
            button,
            ClickAction {
                set_text: Some(set_text.to_string()),
                reveal: vec![listing],
                ignore_first: 0,
            },
        );
        button
    }

    /// "我的预订"页中的预订 / 候补卡片
    pub fn add_listing_card(&self, name: &str, waitlist: bool, visible: bool) -> usize {
        let (card_prefix, name_prefix) = if waitlist {
            ("waitlist-card", "waitlist-class-name")
        } else {
            ("booking-card", "booking-class-name")
        };
        let mut card = MockNode::new(self.unique_id(card_prefix));
        card.visible = visible;
        let card = self.add(self.root(), card);
        self.add(card, MockNode::new(self.unique_id(name_prefix)).text(name));
        card
    }

    fn node(&self, handle: usize) -> BookingResult<MockNode> {
        self.lock()
            .nodes
            .get(handle)
            .cloned()
            .ok_or_else(|| stale_handle(handle))
    }
}

fn stale_handle(handle: usize) -> BookingError {
    BookingError::surface(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("无效的元素句柄: {}", handle),
    ))
}

fn selector_matches(selector: &str, id: &str) -> bool {
    if let Some(exact) = selector.strip_prefix('#').filter(|s| !s.contains(' ')) {
        return id == exact;
    }
    if let Some(prefix) = selector
        .strip_prefix(r#"[id^=""#)
        .and_then(|s| s.strip_suffix(r#""]"#))
    {
        return id.starts_with(prefix);
    }
    id == selector
}

/// 按文档顺序（先序）收集可见的匹配后代
fn collect(state: &MockState, parent: usize, selector: &str, out: &mut Vec<usize>) {
    for &child in &state.nodes[parent].children {
        let node = &state.nodes[child];
        if !node.visible {
            continue;
        }
        if selector_matches(selector, &node.id) {
            out.push(child);
        }
        collect(state, child, selector, out);
    }
}

#[async_trait]
impl SessionSurface for MockSurface {
    type Handle = usize;

    async fn navigate(&self, url: &str) -> BookingResult<()> {
        self.lock().call_history.push(format!("navigate:{}", url));
        Ok(())
    }

    async fn locate(
        &self,
        scope: Scope<'_, Self::Handle>,
        selector: &str,
    ) -> BookingResult<Option<Self::Handle>> {
        Ok(self.locate_all(scope, selector).await?.into_iter().next())
    }

    async fn locate_all(
        &self,
        scope: Scope<'_, Self::Handle>,
        selector: &str,
    ) -> BookingResult<Vec<Self::Handle>> {
        let state = self.lock();
        let parent = match scope {
            Scope::Document => 0,
            Scope::Within(&handle) => handle,
        };
        if parent >= state.nodes.len() {
            return Err(stale_handle(parent));
        }
        let mut found = Vec::new();
        collect(&state, parent, selector, &mut found);
        Ok(found)
    }

    async fn click(&self, handle: &Self::Handle) -> BookingResult<()> {
        let handle = *handle;
        let node = self.node(handle)?;
        let mut state = self.lock();
        state.call_history.push(format!("click:{}", node.id));
        state.clicks.push(handle);

        if let Some(action) = state.nodes[handle].on_click.as_mut() {
            if action.ignore_first > 0 {
                action.ignore_first -= 1;
                return Ok(());
            }
            let action = action.clone();
            if let Some(text) = action.set_text {
                state.nodes[handle].text = text;
            }
            for target in action.reveal {
                if let Some(target) = state.nodes.get_mut(target) {
                    target.visible = true;
                }
            }
        }
        Ok(())
    }

    async fn read_text(&self, handle: &Self::Handle) -> BookingResult<String> {
        Ok(self.node(*handle)?.text)
    }

    async fn type_text(&self, handle: &Self::Handle, text: &str) -> BookingResult<()> {
        let node = self.node(*handle)?;
        let mut state = self.lock();
        state.call_history.push(format!("type:{}", node.id));
        state.nodes[*handle].value = text.to_string();
        Ok(())
    }
}
