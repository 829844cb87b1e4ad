//! 节点配置
//!
//! 加载顺序：`.env` → 环境变量（`POLYGLOT_` 前缀）→ 可选的 `config/polyglot_prompt.toml`。
//! 缺失的键取默认值；`api_key` 为空时回退到 `OPENAI_API_KEY`。

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::time::Duration;

use crate::model_catalog::ModelId;
use crate::models::{AppError, AppErrorType};
use crate::providers::mask_api_key;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

const ENV_PREFIX: &str = "POLYGLOT";
const CONFIG_FILE: &str = "config/polyglot_prompt";

/// 翻译开关（对应节点上的 enable / disable 下拉框）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslateMode {
    #[default]
    Enable,
    Disable,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: ModelId,
    pub translate: TranslateMode,
    pub timeout_ms: Option<u64>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: ModelId::default(),
            translate: TranslateMode::default(),
            timeout_ms: None,
        }
    }
}

// 避免 API Key 出现在日志里
impl fmt::Debug for NodeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &mask_api_key(&self.api_key))
            .field("model", &self.model)
            .field("translate", &self.translate)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl NodeConfig {
    pub fn from_env_and_file() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let mut builder = config::Config::builder().add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );
        if std::path::Path::new(&format!("{}.toml", CONFIG_FILE)).exists() {
            builder = builder.add_source(config::File::with_name(CONFIG_FILE));
        }
        let mut cfg: NodeConfig = builder.build()?.try_deserialize()?;

        // direct env fallback
        if cfg.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                cfg.api_key = key;
            }
        }

        cfg.validate()?;
        tracing::debug!("[Config] loaded {:?}", cfg);
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let parsed = url::Url::parse(self.api_url.trim()).map_err(|e| {
            AppError::with_details(
                AppErrorType::Configuration,
                format!("Invalid API URL: {}", e),
                json!({ "api_url": self.api_url }),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::with_details(
                AppErrorType::Configuration,
                format!("API URL must use http or https, got '{}'", parsed.scheme()),
                json!({ "api_url": self.api_url }),
            ));
        }
        if self.timeout_ms == Some(0) {
            return Err(AppError::configuration("timeout_ms must be greater than 0"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }

    pub fn translation_enabled(&self) -> bool {
        self.translate == TranslateMode::Enable
    }
}
