//! 集成测试共用的传输与编码器替身

#![allow(dead_code)]

use async_trait::async_trait;
use polyglot_prompt_lib::providers::ProviderRequest;
use polyglot_prompt_lib::translation::{TranslationTransport, TransportError, TransportResponse};
use polyglot_prompt_lib::{EncoderOutput, TextEncoder};
use serde_json::{json, Value};
use std::sync::Mutex;

/// 固定返回同一响应，并记录收到的每个请求
pub struct ScriptedTransport {
    response: Result<TransportResponse, String>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedTransport {
    pub fn responding(status: u16, body: impl Into<String>) -> Self {
        Self {
            response: Ok(TransportResponse {
                status,
                body: body.into(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn timing_out(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationTransport for ScriptedTransport {
    async fn send(&self, request: &ProviderRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.response {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(TransportError::Timeout(message.clone())),
        }
    }
}

/// `{"choices":[{"message":{"content": ...}}]}`
pub fn chat_body(content: impl Into<Value>) -> String {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content.into() } }
        ]
    })
    .to_string()
}

/// 记录编码输入；`fail_on` 中的文本编码失败
pub struct RecordingEncoder {
    pub fail_on: Vec<String>,
    pub seen: Mutex<Vec<String>>,
}

impl RecordingEncoder {
    pub fn new() -> Self {
        Self::failing_on(&[])
    }

    pub fn failing_on(texts: &[&str]) -> Self {
        Self {
            fail_on: texts.iter().map(|t| t.to_string()).collect(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl TextEncoder for RecordingEncoder {
    type Tokens = Vec<String>;
    type Embedding = Vec<f32>;
    type Pooled = Vec<f32>;

    fn tokenize(&self, text: &str) -> anyhow::Result<Vec<String>> {
        self.seen.lock().unwrap().push(text.to_string());
        Ok(text.split_whitespace().map(str::to_string).collect())
    }

    fn encode(&self, tokens: Vec<String>) -> anyhow::Result<EncoderOutput<Vec<f32>, Vec<f32>>> {
        let joined = tokens.join(" ");
        if self.fail_on.contains(&joined) {
            anyhow::bail!("encoder rejected '{}'", joined);
        }
        Ok(EncoderOutput {
            embedding: tokens.iter().map(|t| t.len() as f32).collect(),
            pooled_output: vec![tokens.len() as f32],
        })
    }
}
