//! Chromium DevTools 会话 - 基础设施层
//!
//! 持有唯一的 Page 资源，实现 [`SessionSurface`]。

use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::Page;
use tracing::debug;

use crate::error::BookingResult;
use crate::infrastructure::session_surface::{Scope, SessionSurface};

/// 基于 chromiumoxide 的会话实现
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 把查找 / 点击 / 读写文字翻译为 CDP 调用
/// - 不认识课程 / 预订
pub struct CdpSurface {
    page: Page,
}

impl CdpSurface {
    pub fn new(page: Page) -> Self {
        Self { page }
    }
}

#[async_trait]
impl SessionSurface for CdpSurface {
    type Handle = Arc<Element>;

    async fn navigate(&self, url: &str) -> BookingResult<()> {
        debug!("导航到: {}", url);
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn locate(
        &self,
        scope: Scope<'_, Self::Handle>,
        selector: &str,
    ) -> BookingResult<Option<Self::Handle>> {
        // find_element 在元素不存在时返回错误，这里用 find_elements 区分"不存在"与协议错误
        Ok(self.locate_all(scope, selector).await?.into_iter().next())
    }

    async fn locate_all(
        &self,
        scope: Scope<'_, Self::Handle>,
        selector: &str,
    ) -> BookingResult<Vec<Self::Handle>> {
        let elements = match scope {
            Scope::Document => self.page.find_elements(selector).await?,
            Scope::Within(parent) => parent.find_elements(selector).await?,
        };
        Ok(elements.into_iter().map(Arc::new).collect())
    }

    async fn click(&self, handle: &Self::Handle) -> BookingResult<()> {
        handle.click().await?;
        Ok(())
    }

    async fn read_text(&self, handle: &Self::Handle) -> BookingResult<String> {
        Ok(handle.inner_text().await?.unwrap_or_default())
    }

    async fn type_text(&self, handle: &Self::Handle, text: &str) -> BookingResult<()> {
        handle
            .call_js_fn("function() { this.value = ''; }", false)
            .await?;
        handle.focus().await?;
        handle.type_str(text).await?;
        Ok(())
    }
}
