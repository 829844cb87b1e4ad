//! 翻译模块类型定义
use serde::{Deserialize, Serialize};

use crate::model_catalog::ModelId;

/// 拒绝类失败（解析失败、API 报错、模型拒答）使用的默认提示词
pub const REFUSAL_DEFAULT_PROMPT: &str = "a cute 3D style yellow kitten";

/// 异常类失败（网络错误、空译文、空输入、编码失败）使用的默认提示词
pub const EXCEPTION_DEFAULT_PROMPT: &str = "a cute 3D style red kitten";

/// 两类回退提示词
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultPrompt {
    Refusal,
    Exception,
}

impl DefaultPrompt {
    pub fn text(self) -> &'static str {
        match self {
            DefaultPrompt::Refusal => REFUSAL_DEFAULT_PROMPT,
            DefaultPrompt::Exception => EXCEPTION_DEFAULT_PROMPT,
        }
    }
}

/// 翻译请求（每次调用构造一次）
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub endpoint: String,
    pub api_key: String,
    pub model: ModelId,
    pub source_text: String,
}

/// 翻译结果分类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationResult {
    Success(String),
    ApiError {
        message: String,
        fallback: DefaultPrompt,
    },
    MalformedResponse(String),
    EmptyTranslation,
    NetworkFailure(String),
}

impl TranslationResult {
    /// 该结果最终交给编码器的文本
    pub fn resolved_text(&self) -> &str {
        match self {
            TranslationResult::Success(text) => text,
            TranslationResult::ApiError { fallback, .. } => fallback.text(),
            TranslationResult::MalformedResponse(_) => REFUSAL_DEFAULT_PROMPT,
            TranslationResult::EmptyTranslation | TranslationResult::NetworkFailure(_) => {
                EXCEPTION_DEFAULT_PROMPT
            }
        }
    }

    /// 非成功路径的诊断信息
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            TranslationResult::Success(_) => None,
            TranslationResult::ApiError { message, .. } => Some(format!("API error: {}", message)),
            TranslationResult::MalformedResponse(message) => {
                Some(format!("Malformed response: {}", message))
            }
            TranslationResult::EmptyTranslation => {
                Some("Translation returned an empty result.".to_string())
            }
            TranslationResult::NetworkFailure(message) => {
                Some(format!("Request failed: {}", message))
            }
        }
    }
}

/// 解析结果：最终文本 + 诊断信息（无问题时为空串）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPrompt {
    pub final_text: String,
    pub diagnostic: String,
}

/// 结构化输出模式下 `message.content` 的内层 JSON
#[derive(Debug, Deserialize)]
pub(crate) struct StructuredTranslation {
    pub translated_text: String,
}
