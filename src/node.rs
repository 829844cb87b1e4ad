//! 多语言提示词节点
//!
//! 宿主调用的唯一入口：先解析提示词，再交给编码器。

use std::sync::Arc;

use crate::config::NodeConfig;
use crate::encoding::{encode_with_fallback, EncodingOutcome, TextEncoder};
use crate::models::AppError;
use crate::translation::{HttpTransport, PromptResolver, ResolvedPrompt, TranslationTransport};

/// 节点输出：解析后的提示词 + 编码结果
#[derive(Debug, Clone, PartialEq)]
pub struct NodeOutput<E, P> {
    pub prompt: ResolvedPrompt,
    pub outcome: EncodingOutcome<E, P>,
}

pub struct PromptNode {
    resolver: PromptResolver,
}

impl PromptNode {
    /// 校验配置并创建带超时的 HTTP 传输
    pub fn new(config: NodeConfig) -> Result<Self, AppError> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: NodeConfig, transport: Arc<dyn TranslationTransport>) -> Self {
        Self {
            resolver: PromptResolver::new(config, transport),
        }
    }

    pub fn resolver(&self) -> &PromptResolver {
        &self.resolver
    }

    pub async fn run<C>(
        &self,
        encoder: &C,
        text: &str,
        english_suffix: &str,
    ) -> NodeOutput<C::Embedding, C::Pooled>
    where
        C: TextEncoder + ?Sized,
    {
        let prompt = self.resolver.resolve(text, english_suffix).await;
        tracing::info!("[PromptNode] Prompt: {}", prompt.final_text);

        let outcome = encode_with_fallback(encoder, &prompt.final_text);
        NodeOutput { prompt, outcome }
    }
}
