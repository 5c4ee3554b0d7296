//! 错误类型
//!
//! 区分"可在本地恢复"的错误（校验失败、未找到）与"需要重试 / 终止运行"的错误。

use thiserror::Error;

/// 预订引擎错误类型
#[derive(Debug, Error)]
pub enum BookingError {
    /// 请求字段缺失或为空（不重试，转换为 not_found 记录）
    #[error("{message}")]
    Validation { message: String },

    /// 没有匹配的日期分组或时间段（不重试，转换为 not_found 记录）
    #[error("{message}")]
    NotFound { message: String },

    /// 控件状态未在限定时间内变化（可重试）
    #[error("等待超时: {what}")]
    TransientTimeout { what: String },

    /// 重试次数耗尽，终止整个运行
    #[error("Error: done retrying {description} (已尝试 {attempts} 次): {last}")]
    Terminal {
        description: String,
        attempts: usize,
        last: String,
    },

    /// 元素缺少必需的子字段（记录警告后跳过）
    #[error("元素格式错误: {what}")]
    MalformedElement { what: String },

    /// 浏览器 / 协议层错误
    #[error("会话操作失败: {source}")]
    Surface {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 文件读写错误
    #[error("文件错误 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 请求文件 / 报告序列化错误
    #[error("解析失败: {0}")]
    Parse(String),
}

impl BookingError {
    /// 是否为可重试的瞬时超时
    pub fn is_transient(&self) -> bool {
        matches!(self, BookingError::TransientTimeout { .. })
    }

    /// 是否可以在本地恢复为 not_found 记录
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BookingError::Validation { .. } | BookingError::NotFound { .. }
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        BookingError::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        BookingError::NotFound {
            message: message.into(),
        }
    }

    pub fn timeout(what: impl Into<String>) -> Self {
        BookingError::TransientTimeout { what: what.into() }
    }

    pub fn malformed(what: impl Into<String>) -> Self {
        BookingError::MalformedElement { what: what.into() }
    }

    /// 包装任意第三方错误为会话错误
    pub fn surface(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        BookingError::Surface {
            source: Box::new(source),
        }
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        BookingError::Io {
            path: path.into(),
            source,
        }
    }
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for BookingError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        BookingError::surface(err)
    }
}

impl From<toml::de::Error> for BookingError {
    fn from(err: toml::de::Error) -> Self {
        BookingError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::Parse(err.to_string())
    }
}

// ========== Result 类型别名 ==========

/// 预订引擎结果类型
pub type BookingResult<T> = Result<T, BookingError>;
