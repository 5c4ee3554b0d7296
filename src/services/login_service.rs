//! 登录与课程筛选 - 业务能力层
//!
//! 只做"提交凭据并等待成功信号"，不涉及认证协议细节。

use tracing::{debug, info};

use crate::config::Timing;
use crate::error::BookingResult;
use crate::infrastructure::selectors;
use crate::infrastructure::{wait_for_element, Scope, SessionSurface};

/// 登录服务
pub struct LoginService<'a, S: SessionSurface> {
    surface: &'a S,
    timing: &'a Timing,
}

impl<'a, S: SessionSurface> LoginService<'a, S> {
    pub fn new(surface: &'a S, timing: &'a Timing) -> Self {
        Self { surface, timing }
    }

    /// 单次登录尝试；任一元素等待超时都是瞬时错误，由调用方重试
    pub async fn login(&self, email: &str, password: &str) -> BookingResult<()> {
        let login_button = self.wait_for(selectors::LOGIN_BUTTON).await?;
        self.surface.click(&login_button).await?;

        let email_input = self.wait_for(selectors::EMAIL_INPUT).await?;
        self.surface.type_text(&email_input, email).await?;

        let password_input = self.wait_for(selectors::PASSWORD_INPUT).await?;
        self.surface.type_text(&password_input, password).await?;

        let submit = self.wait_for(selectors::SUBMIT_BUTTON).await?;
        self.surface.click(&submit).await?;

        // 课程表页面出现即视为登录成功
        self.wait_for(selectors::SCHEDULE_PAGE).await?;
        info!("✓ 登录成功");
        Ok(())
    }

    /// 按课程类型筛选课程表
    pub async fn apply_class_filter(&self) -> BookingResult<()> {
        let filter = self.wait_for(selectors::TYPE_FILTER).await?;
        self.surface.click(&filter).await?;

        let option = self.wait_for(selectors::TYPE_FILTER_OPTION).await?;
        let label = self.surface.read_text(&option).await?;
        self.surface.click(&option).await?;
        debug!("已选择课程类型: {}", label.trim());
        Ok(())
    }

    async fn wait_for(&self, selector: &str) -> BookingResult<S::Handle> {
        wait_for_element(self.surface, Scope::Document, selector, self.timing).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{MockNode, MockSurface};
    use std::time::Duration;

    fn create_test_timing() -> Timing {
        Timing {
            wait_timeout: Duration::from_millis(10),
            poll_interval: Duration::from_millis(2),
            ..Timing::default()
        }
    }

    #[tokio::test]
    async fn test_login_fills_credentials() {
        let surface = MockSurface::new();
        surface.add_login_flow();
        let timing = create_test_timing();

        let service = LoginService::new(&surface, &timing);
        service.login("me@example.com", "hunter2").await.unwrap();

        let history = surface.history();
        assert_eq!(history.first().map(String::as_str), Some("click:login-button"));
        assert!(history.contains(&"type:email-input".to_string()));
        assert!(history.contains(&"click:submit-button".to_string()));

        let email_input = surface
            .locate(Scope::Document, selectors::EMAIL_INPUT)
            .await
            .unwrap()
            .unwrap();
        let password_input = surface
            .locate(Scope::Document, selectors::PASSWORD_INPUT)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(surface.value_of(email_input), "me@example.com");
        assert_eq!(surface.value_of(password_input), "hunter2");
    }

    #[tokio::test]
    async fn test_login_without_success_signal_times_out() {
        let surface = MockSurface::new();
        let root = surface.root();
        surface.add(root, MockNode::new("login-button"));
        surface.add(root, MockNode::new("email-input"));
        surface.add(root, MockNode::new("password-input"));
        surface.add(root, MockNode::new("submit-button"));
        let timing = create_test_timing();

        let err = LoginService::new(&surface, &timing)
            .login("me@example.com", "hunter2")
            .await
            .unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_apply_class_filter() {
        let surface = MockSurface::new();
        surface.add_login_flow();
        let timing = create_test_timing();

        LoginService::new(&surface, &timing)
            .apply_class_filter()
            .await
            .unwrap();
        assert!(surface.was_called("click:type-filter"));
        assert!(surface.was_called(&format!("click:{}", selectors::TYPE_FILTER_OPTION)));
    }
}
