use serde_json::{json, Value};
// 提示词解析管线 - 核心业务逻辑
use std::sync::Arc;

use crate::config::NodeConfig;
use crate::model_catalog::ModelId;
use crate::providers::OpenAIAdapter;

use super::parser::classify_response;
use super::transport::TranslationTransport;
use super::types::{
    ResolvedPrompt, TranslationRequest, TranslationResult, EXCEPTION_DEFAULT_PROMPT,
};

pub const TRANSLATION_INSTRUCTION: &str = "You are a translation expert. Your task is to accurately and fluently translate the following text into English, ensuring the translation is optimized for use as a prompt in AI-generated image creation. The translation should be natural, precise, and tailored for generating visual content. Do not add any additional comments or notes.";

const STRUCTURED_OUTPUT_INSTRUCTION: &str =
    " Respond only with compact JSON of the form {\"translated_text\": \"...\"}.";

/// 构造 chat/completions 请求体
///
/// - 不支持 system 角色的模型：指令拼接在用户文本前，只发一条 user 消息
/// - 支持结构化输出的模型：附带严格 JSON Schema，要求单个 `translated_text` 字段
pub fn build_translation_payload(model: ModelId, text: &str) -> Value {
    let capability = model.capability();

    let mut instruction = TRANSLATION_INSTRUCTION.to_string();
    if capability.supports_structured_output {
        instruction.push_str(STRUCTURED_OUTPUT_INSTRUCTION);
    }

    let messages = if capability.supports_system_role {
        vec![
            json!({
                "role": "system",
                "content": instruction
            }),
            json!({
                "role": "user",
                "content": text
            }),
        ]
    } else {
        vec![json!({
            "role": "user",
            "content": format!("{}\n\n{}", instruction, text)
        })]
    };

    let mut body = json!({
        "model": model.as_str(),
        "messages": messages,
    });
    if capability.supports_structured_output {
        body["response_format"] = translation_response_format();
    }
    body
}

fn translation_response_format() -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "translation",
            "strict": true,
            "schema": {
                "type": "object",
                "properties": {
                    "translated_text": { "type": "string" }
                },
                "required": ["translated_text"],
                "additionalProperties": false
            }
        }
    })
}

/// 提示词解析器
///
/// 线性流程：可选翻译请求 → 响应归类 → 回退选择 → 追加英文后缀 → 空文本兜底。
/// 永远返回可用文本，失败原因写入 `diagnostic`。
pub struct PromptResolver {
    config: NodeConfig,
    transport: Arc<dyn TranslationTransport>,
}

impl PromptResolver {
    pub fn new(config: NodeConfig, transport: Arc<dyn TranslationTransport>) -> Self {
        Self { config, transport }
    }

    pub async fn resolve(&self, multilingual_prompt: &str, english_suffix: &str) -> ResolvedPrompt {
        let mut diagnostic = String::new();

        let source = multilingual_prompt.trim();
        let mut text = if source.is_empty() {
            String::new()
        } else if !self.config.translation_enabled() {
            tracing::info!("[Translation] translation disabled, using prompt as-is");
            source.to_string()
        } else {
            let result = self.translate(source).await;
            if let Some(reason) = result.diagnostic() {
                tracing::warn!(
                    "[Translation] {}; falling back to '{}'",
                    reason,
                    result.resolved_text()
                );
                diagnostic = reason;
            }
            result.resolved_text().to_string()
        };

        let suffix = english_suffix.trim();
        if !suffix.is_empty() {
            if text.is_empty() {
                text = suffix.to_string();
            } else {
                text.push(' ');
                text.push_str(suffix);
            }
        }

        if text.is_empty() {
            tracing::warn!(
                "[Translation] prompt and suffix are both empty; using '{}'",
                EXCEPTION_DEFAULT_PROMPT
            );
            text = EXCEPTION_DEFAULT_PROMPT.to_string();
            if diagnostic.is_empty() {
                diagnostic = "Prompt is empty; using default prompt".to_string();
            }
        }

        ResolvedPrompt {
            final_text: text,
            diagnostic,
        }
    }

    /// 发起一次翻译请求并归类结果（不重试）
    pub async fn translate(&self, source_text: &str) -> TranslationResult {
        let request = TranslationRequest {
            endpoint: self.config.api_url.clone(),
            api_key: self.config.api_key.clone(),
            model: self.config.model,
            source_text: source_text.to_string(),
        };
        let structured = request.model.supports_structured_output();
        let payload = build_translation_payload(request.model, &request.source_text);

        let preq = match OpenAIAdapter.build_request(&request.endpoint, &request.api_key, &payload)
        {
            Ok(preq) => preq,
            Err(e) => return TranslationResult::NetworkFailure(e.to_string()),
        };

        tracing::info!(
            "[Translation] translating {} chars with {} (structured={})",
            request.source_text.chars().count(),
            request.model,
            structured
        );

        match self.transport.send(&preq).await {
            Ok(response) => classify_response(response.status, &response.body, structured),
            Err(e) => TranslationResult::NetworkFailure(e.to_string()),
        }
    }
}
