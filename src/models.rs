use serde::{Deserialize, Serialize};
use std::fmt;

// 结构化错误处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppErrorType {
    Validation,
    Configuration,
    Network,
    Unknown,
}

/// 节点装配期（配置加载、HTTP 客户端构建、CLI 输入）使用的错误类型。
///
/// 提示词解析本身从不返回错误：所有翻译失败都在本地回退为默认提示词。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppError {
    pub error_type: AppErrorType,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl AppError {
    pub fn new(error_type: AppErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error_type: AppErrorType,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_type,
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(AppErrorType::Validation, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(AppErrorType::Configuration, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AppErrorType::Network, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(AppErrorType::Unknown, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

// 实现Error trait
impl std::error::Error for AppError {}

// 实现从其他错误类型的转换
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::unknown(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::validation(format!("JSON serialization error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::unknown(format!("IO error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::configuration(format!("Failed to load configuration: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::network(format!("HTTP client error: {}", err))
    }
}
