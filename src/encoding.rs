//! 文本编码委托
//!
//! 编码器（CLIP）由宿主提供，这里只把它当作 tokenize + encode 两个能力。
//! 编码失败时用异常默认提示词重试一次，仍失败则报告 `Failed`，不伪造嵌入。

use tracing::{error, warn};

use crate::translation::EXCEPTION_DEFAULT_PROMPT;

/// 编码器输出：条件嵌入 + pooled 输出
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderOutput<E, P> {
    pub embedding: E,
    pub pooled_output: P,
}

/// 宿主注入的文本编码器
pub trait TextEncoder {
    type Tokens;
    type Embedding;
    type Pooled;

    fn tokenize(&self, text: &str) -> anyhow::Result<Self::Tokens>;

    fn encode(
        &self,
        tokens: Self::Tokens,
    ) -> anyhow::Result<EncoderOutput<Self::Embedding, Self::Pooled>>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum EncodingOutcome<E, P> {
    Encoded(EncoderOutput<E, P>),
    Failed(String),
}

impl<E, P> EncodingOutcome<E, P> {
    pub fn is_encoded(&self) -> bool {
        matches!(self, EncodingOutcome::Encoded(_))
    }
}

fn encode_once<C>(encoder: &C, text: &str) -> anyhow::Result<EncoderOutput<C::Embedding, C::Pooled>>
where
    C: TextEncoder + ?Sized,
{
    let tokens = encoder.tokenize(text)?;
    encoder.encode(tokens)
}

/// 编码提示词；失败时恰好重试一次（使用异常默认提示词）
pub fn encode_with_fallback<C>(encoder: &C, prompt: &str) -> EncodingOutcome<C::Embedding, C::Pooled>
where
    C: TextEncoder + ?Sized,
{
    let first_err = match encode_once(encoder, prompt) {
        Ok(output) => return EncodingOutcome::Encoded(output),
        Err(e) => e,
    };
    warn!(
        "[Encoding] encoding '{}' failed: {:#}; retrying with '{}'",
        prompt,
        first_err,
        EXCEPTION_DEFAULT_PROMPT
    );

    match encode_once(encoder, EXCEPTION_DEFAULT_PROMPT) {
        Ok(output) => EncodingOutcome::Encoded(output),
        Err(retry_err) => {
            let message = format!(
                "Encoding failed: {:#}; retry with default prompt failed: {:#}",
                first_err, retry_err
            );
            error!("[Encoding] {}", message);
            EncodingOutcome::Failed(message)
        }
    }
}
