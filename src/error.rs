use std::fmt;

// =========================================================
// 错误状态枚举
// =========================================================

/// 错误状态枚举
/// 对应错误分类，决定页面如何向用户呈现
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStatus {
    /// 启动期配置错误（如路由表模式非法），直接失败
    Config,
    /// 网络层失败（请求无法发出或无响应）
    Network,
    /// 404: 远端资源不存在
    NotFound,
    /// 401: 远端拒绝凭据
    Unauthorized,
    /// 远端返回非成功状态码
    Remote,
    /// JSON 解析或序列化错误
    Serialization,
}

impl ErrorStatus {
    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorStatus::Config => "CONFIG_ERROR",
            ErrorStatus::Network => "NETWORK_ERROR",
            ErrorStatus::NotFound => "RESOURCE_NOT_FOUND",
            ErrorStatus::Unauthorized => "UNAUTHORIZED",
            ErrorStatus::Remote => "REMOTE_ERROR",
            ErrorStatus::Serialization => "JSON_PARSE_ERROR",
        }
    }

    /// 从 HTTP 状态码映射
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorStatus::Unauthorized,
            404 => ErrorStatus::NotFound,
            _ => ErrorStatus::Remote,
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
/// 记录错误发生时的操作和相关细节
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSpan {
    /// 操作名称，如 "api.fetch", "route.build"
    pub operation: String,
    /// 额外的细节信息，如资源路径、路由模式等
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 导航核心的统一错误类型
///
/// - status: 错误类型/语义
/// - message: 错误消息
/// - source: 原始错误（可选，用于错误链）
/// - spans: 结构化的调用追踪栈
#[derive(Debug)]
pub struct MarqueeError {
    pub status: ErrorStatus,
    pub message: String,
    source: Option<Box<dyn std::error::Error + 'static>>,
    spans: Vec<ErrorSpan>,
}

impl MarqueeError {
    pub fn new(status: ErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            source: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorStatus::Config, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorStatus::Network, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorStatus::NotFound, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorStatus::Serialization, message)
    }

    /// 根据 HTTP 状态码构造
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorStatus::from_http_status(status), message)
    }

    // --- Context builders (Builder Pattern) ---

    /// 添加操作追踪（无额外细节）
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    /// 添加操作追踪（带额外细节）
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    /// 设置原始错误源
    pub fn with_source<E: std::error::Error + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }

    pub fn is_not_found(&self) -> bool {
        self.status == ErrorStatus::NotFound
    }
}

// =========================================================
// Display & Error trait 实现
// =========================================================

impl fmt::Display for MarqueeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for MarqueeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_deref()
    }
}

pub type MarqueeResult<T> = std::result::Result<T, MarqueeError>;

// =========================================================
// 类型转换实现
// =========================================================

impl From<serde_json::Error> for MarqueeError {
    fn from(e: serde_json::Error) -> Self {
        MarqueeError::serialization(e.to_string()).with_source(e)
    }
}

impl From<regex::Error> for MarqueeError {
    fn from(e: regex::Error) -> Self {
        MarqueeError::config(e.to_string()).with_source(e)
    }
}
