// Polyglot Prompt library entry
// 多语言提示词 → 英文翻译 → 宿主编码器。bin 目标仅用于手动验证翻译链路。

pub mod config;
pub mod encoding;
pub mod model_catalog;
pub mod models;
pub mod node;
pub mod providers;
pub mod translation;

pub use config::{NodeConfig, TranslateMode};
pub use encoding::{encode_with_fallback, EncoderOutput, EncodingOutcome, TextEncoder};
pub use model_catalog::ModelId;
pub use models::{AppError, AppErrorType};
pub use node::{NodeOutput, PromptNode};
pub use translation::{PromptResolver, ResolvedPrompt, TranslationResult};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// 初始化日志（默认 info，可用 RUST_LOG 覆盖）
pub fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    // 宿主可能已经安装了全局 subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
