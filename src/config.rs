use std::time::Duration;

use crate::error::{BookingError, BookingResult};

/// 等待 / 重试相关的时间参数
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timing {
    /// 每个步骤的最大尝试次数
    pub max_retries: usize,
    /// 两次重试之间的固定间隔
    pub retry_delay: Duration,
    /// 等待元素出现 / 按钮状态变化的超时
    pub wait_timeout: Duration,
    /// 轮询间隔
    pub poll_interval: Duration,
    /// 每次分类后让页面稳定的间隔
    pub settle_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            max_retries: 7,
            retry_delay: Duration::from_millis(90),
            wait_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(100),
            settle_delay: Duration::from_millis(50),
        }
    }
}

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 目标URL
    pub target_url: String,
    /// 登录邮箱
    pub email: String,
    /// 登录密码
    pub password: String,
    /// 已启动浏览器的调试端口；为空时自行启动浏览器
    pub browser_debug_port: Option<u16>,
    /// 连接已启动浏览器时复用标题包含此文字的页面
    pub page_title_match: Option<String>,
    /// 自行启动时是否使用无头模式
    pub headless: bool,
    /// 浏览器用户目录（保留登录状态）
    pub user_data_dir: String,
    /// 预订请求 TOML 文件
    pub requests_file: String,
    /// 是否在登录后筛选课程类型
    pub apply_class_filter: bool,
    /// 运行报告 JSON 输出路径
    pub report_json_path: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    pub timing: Timing,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: "https://appbrewery.github.io/gym".to_string(),
            email: String::new(),
            password: String::new(),
            browser_debug_port: None,
            page_title_match: None,
            headless: false,
            user_data_dir: "chrome_profile".to_string(),
            requests_file: "bookings.toml".to_string(),
            apply_class_filter: true,
            report_json_path: None,
            verbose_logging: false,
            timing: Timing::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        let timing = Timing {
            max_retries: env_parse("MAX_RETRIES").unwrap_or(default.timing.max_retries),
            retry_delay: env_parse("RETRY_DELAY_MS").map(Duration::from_millis).unwrap_or(default.timing.retry_delay),
            wait_timeout: env_parse("WAIT_TIMEOUT_MS").map(Duration::from_millis).unwrap_or(default.timing.wait_timeout),
            poll_interval: env_parse("POLL_INTERVAL_MS").map(Duration::from_millis).unwrap_or(default.timing.poll_interval),
            settle_delay: env_parse("SETTLE_DELAY_MS").map(Duration::from_millis).unwrap_or(default.timing.settle_delay),
        };
        Self {
            target_url: std::env::var("TARGET_URL").unwrap_or(default.target_url),
            email: std::env::var("EMAIL_ADDRESS").unwrap_or(default.email),
            password: std::env::var("APP_PASSWORD").unwrap_or(default.password),
            browser_debug_port: env_parse("BROWSER_DEBUG_PORT").or(default.browser_debug_port),
            page_title_match: std::env::var("PAGE_TITLE_MATCH")
                .ok()
                .filter(|t| !t.trim().is_empty())
                .or(default.page_title_match),
            headless: env_parse("HEADLESS").unwrap_or(default.headless),
            user_data_dir: std::env::var("USER_DATA_DIR").unwrap_or(default.user_data_dir),
            requests_file: std::env::var("REQUESTS_FILE").unwrap_or(default.requests_file),
            apply_class_filter: env_parse("APPLY_CLASS_FILTER").unwrap_or(default.apply_class_filter),
            report_json_path: std::env::var("REPORT_JSON_PATH").ok().or(default.report_json_path),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(default.verbose_logging),
            timing,
        }
    }

    /// 校验登录凭据，缺失时在启动浏览器之前失败
    pub fn validate(&self) -> BookingResult<()> {
        if self.email.trim().is_empty() || self.password.trim().is_empty() {
            return Err(BookingError::Config(
                "Email and password are required. Set EMAIL_ADDRESS and APP_PASSWORD.".to_string(),
            ));
        }
        if self.timing.max_retries == 0 {
            return Err(BookingError::Config("MAX_RETRIES 必须大于 0".to_string()));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
