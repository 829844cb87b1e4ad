use serde_json::Value;

#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{0}")]
    BuildFailed(String),
}

/// 日志用的 API Key 掩码（仅显示前 4 字符）
pub fn mask_api_key(api_key: &str) -> String {
    let trimmed = api_key.trim();
    if trimmed.is_empty() {
        return "EMPTY".to_string();
    }
    format!(
        "{}**** (len={})",
        trimmed.chars().take(4).collect::<String>(),
        trimmed.chars().count()
    )
}

/// OpenAI 兼容的 chat/completions 适配器
///
/// 与多供应商的拼接规则不同，节点配置里填写的是完整端点，这里原样使用。
pub struct OpenAIAdapter;

impl OpenAIAdapter {
    pub fn build_request(
        &self,
        endpoint: &str,
        api_key: &str,
        body: &Value,
    ) -> Result<ProviderRequest, ProviderError> {
        let url = endpoint.trim();
        url::Url::parse(url)
            .map_err(|e| ProviderError::BuildFailed(format!("Invalid endpoint '{}': {}", url, e)))?;

        // 确保 API key 被 trim，移除首尾空白字符
        let trimmed_key = api_key.trim();
        tracing::debug!(
            "[OpenAIAdapter] build_request: url={}, api_key={}",
            url,
            mask_api_key(trimmed_key)
        );

        Ok(ProviderRequest {
            url: url.to_string(),
            headers: vec![
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", trimmed_key),
                ),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body: body.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_request_uses_endpoint_verbatim() {
        let req = OpenAIAdapter
            .build_request(
                " https://proxy.local/v1/chat/completions ",
                " sk-test ",
                &json!({"model": "gpt-4"}),
            )
            .unwrap();
        assert_eq!(req.url, "https://proxy.local/v1/chat/completions");
        assert!(req
            .headers
            .contains(&("Authorization".to_string(), "Bearer sk-test".to_string())));
        assert!(req
            .headers
            .contains(&("Content-Type".to_string(), "application/json".to_string())));
        assert_eq!(req.body["model"], "gpt-4");
    }

    #[test]
    fn test_build_request_rejects_invalid_endpoint() {
        let err = OpenAIAdapter
            .build_request("localhost without scheme", "k", &json!({}))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid endpoint"));
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("   "), "EMPTY");
        assert_eq!(mask_api_key("sk-abcdef"), "sk-a**** (len=9)");
        assert_eq!(mask_api_key("ab"), "ab**** (len=2)");
    }
}
