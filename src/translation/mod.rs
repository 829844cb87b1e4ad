//! 翻译模块 - 单次请求 + 本地回退
//!
//! 职责：
//! - 按模型能力构造翻译请求
//! - 归类响应（成功 / API 报错 / 格式错误 / 空译文 / 网络失败）
//! - 选择默认提示词并追加英文后缀
//!
//! 解析阶段不向调用方返回错误，诊断信息随结果一起返回。
pub mod parser;
pub mod pipeline;
pub mod transport;
pub mod types;

pub use pipeline::{build_translation_payload, PromptResolver, TRANSLATION_INSTRUCTION};
pub use transport::{HttpTransport, TranslationTransport, TransportError, TransportResponse};
pub use types::{
    DefaultPrompt, ResolvedPrompt, TranslationRequest, TranslationResult,
    EXCEPTION_DEFAULT_PROMPT, REFUSAL_DEFAULT_PROMPT,
};
