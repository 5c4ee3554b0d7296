//! 基础设施层
//!
//! 持有稀缺资源（浏览器页面），只向上层暴露会话能力。

pub mod cdp_surface;
pub mod mock_surface;
pub mod selectors;
pub mod session_surface;
pub mod wait;

pub use cdp_surface::CdpSurface;
pub use mock_surface::{MockNode, MockSurface};
pub use session_surface::{Scope, SessionSurface};
pub use wait::{wait_for_element, wait_until};
