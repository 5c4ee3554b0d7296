//! 会话能力接口
//!
//! 预订引擎只依赖这个接口，不直接发出任何浏览器协议调用。

use async_trait::async_trait;

use crate::error::BookingResult;

/// 元素查找范围
#[derive(Debug)]
pub enum Scope<'a, H> {
    /// 整个文档
    Document,
    /// 某个元素的后代
    Within(&'a H),
}

impl<H> Clone for Scope<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for Scope<'_, H> {}

/// 会话能力
///
/// 职责：
/// - 导航、查找元素、点击、读写文字
/// - 不认识课程 / 预订
/// - 句柄只在页面未变化前有效，调用方不得跨请求缓存
#[async_trait]
pub trait SessionSurface: Send + Sync {
    /// 元素句柄
    type Handle: Clone + Send + Sync;

    /// 导航到指定 URL
    async fn navigate(&self, url: &str) -> BookingResult<()>;

    /// 查找第一个匹配的元素，不存在时返回 `None`
    async fn locate(
        &self,
        scope: Scope<'_, Self::Handle>,
        selector: &str,
    ) -> BookingResult<Option<Self::Handle>>;

    /// 按文档顺序查找所有匹配的元素
    async fn locate_all(
        &self,
        scope: Scope<'_, Self::Handle>,
        selector: &str,
    ) -> BookingResult<Vec<Self::Handle>>;

    async fn click(&self, handle: &Self::Handle) -> BookingResult<()>;

    /// 读取元素的可见文字
    async fn read_text(&self, handle: &Self::Handle) -> BookingResult<String>;

    /// 清空输入框后输入文字
    async fn type_text(&self, handle: &Self::Handle, text: &str) -> BookingResult<()>;
}
