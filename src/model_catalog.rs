//! 内置模型能力表
//!
//! 集中管理节点可选的翻译模型及其请求能力。
//! 构造请求时只查表，不对模型名做子串匹配。
//!
//! 注意：
//! - o1 系列拒绝 system 角色，指令需并入 user 消息
//! - 仅部分 4o 版本支持严格 JSON Schema 结构化输出

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::AppError;

/// 节点可选的翻译模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ModelId {
    #[default]
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4o-2024-08-06")]
    Gpt4o20240806,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "o1-preview")]
    O1Preview,
    #[serde(rename = "o1-mini")]
    O1Mini,
}

/// 内置模型能力定义
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelCapability {
    pub model: ModelId,
    pub id: &'static str,
    /// 是否接受独立的 system 角色消息
    pub supports_system_role: bool,
    /// 是否支持 `response_format: json_schema`
    pub supports_structured_output: bool,
}

/// 所有内置模型列表（顺序即 UI 下拉顺序）
pub const MODEL_CAPABILITIES: &[ModelCapability] = &[
    ModelCapability {
        model: ModelId::Gpt4oMini,
        id: "gpt-4o-mini",
        supports_system_role: true,
        supports_structured_output: true,
    },
    ModelCapability {
        model: ModelId::Gpt4o20240806,
        id: "gpt-4o-2024-08-06",
        supports_system_role: true,
        supports_structured_output: true,
    },
    ModelCapability {
        model: ModelId::Gpt4o,
        id: "gpt-4o",
        supports_system_role: true,
        supports_structured_output: false,
    },
    ModelCapability {
        model: ModelId::Gpt4Turbo,
        id: "gpt-4-turbo",
        supports_system_role: true,
        supports_structured_output: false,
    },
    ModelCapability {
        model: ModelId::Gpt4,
        id: "gpt-4",
        supports_system_role: true,
        supports_structured_output: false,
    },
    ModelCapability {
        model: ModelId::Gpt35Turbo,
        id: "gpt-3.5-turbo",
        supports_system_role: true,
        supports_structured_output: false,
    },
    ModelCapability {
        model: ModelId::O1Preview,
        id: "o1-preview",
        supports_system_role: false,
        supports_structured_output: false,
    },
    ModelCapability {
        model: ModelId::O1Mini,
        id: "o1-mini",
        supports_system_role: false,
        supports_structured_output: false,
    },
];

impl ModelId {
    pub fn all() -> impl Iterator<Item = ModelId> {
        MODEL_CAPABILITIES.iter().map(|cap| cap.model)
    }

    pub fn capability(self) -> &'static ModelCapability {
        // 表顺序与枚举声明顺序一致，由 test_every_model_has_capability 保证
        &MODEL_CAPABILITIES[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.capability().id
    }

    pub fn supports_system_role(self) -> bool {
        self.capability().supports_system_role
    }

    pub fn supports_structured_output(self) -> bool {
        self.capability().supports_structured_output
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MODEL_CAPABILITIES
            .iter()
            .find(|cap| cap.id.eq_ignore_ascii_case(wanted))
            .map(|cap| cap.model)
            .ok_or_else(|| {
                let supported: Vec<&str> = MODEL_CAPABILITIES.iter().map(|c| c.id).collect();
                AppError::configuration(format!(
                    "Unsupported model '{}', expected one of: {}",
                    wanted,
                    supported.join(", ")
                ))
            })
    }
}
