//! 翻译响应解析
//!
//! 纯函数模块：把 HTTP 状态码 + 响应体归类为 [`TranslationResult`]，不做任何 IO。

use serde_json::Value;

use super::types::{DefaultPrompt, StructuredTranslation, TranslationResult};

/// 归类一次 chat/completions 响应
///
/// `structured` 表示请求里是否声明了 `response_format: json_schema`。
pub fn classify_response(status: u16, body: &str, structured: bool) -> TranslationResult {
    if status != 200 {
        return classify_error_status(status, body, structured);
    }

    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            return TranslationResult::MalformedResponse(format!(
                "response body is not valid JSON: {}",
                e
            ))
        }
    };

    if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return TranslationResult::ApiError {
            message,
            fallback: DefaultPrompt::Refusal,
        };
    }

    let Some(message) = value.pointer("/choices/0/message") else {
        return TranslationResult::MalformedResponse(
            "response is missing choices[0].message".to_string(),
        );
    };

    let Some(content) = message.get("content").and_then(Value::as_str) else {
        // 结构化输出下模型拒答时 content 为 null，理由放在 refusal 字段
        if let Some(refusal) = message.get("refusal").and_then(Value::as_str) {
            return TranslationResult::ApiError {
                message: format!("model refused to translate: {}", refusal),
                fallback: DefaultPrompt::Refusal,
            };
        }
        return TranslationResult::MalformedResponse(
            "response is missing choices[0].message.content".to_string(),
        );
    };

    let text = if structured {
        match serde_json::from_str::<StructuredTranslation>(content) {
            Ok(parsed) => parsed.translated_text,
            Err(e) => {
                return TranslationResult::MalformedResponse(format!(
                    "structured content is not a valid translation object: {}",
                    e
                ))
            }
        }
    } else {
        content.to_string()
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        TranslationResult::EmptyTranslation
    } else {
        TranslationResult::Success(trimmed.to_string())
    }
}

/// 非 200 状态码
///
/// 只有在结构化模式下、且错误消息包含 "exception" 时才选异常默认值。
/// 自动生成的 "Unexpected error with status code N" 永远不含该词，
/// 因此缺少 `error.message` 的响应总是落到拒绝默认值。
fn classify_error_status(status: u16, body: &str, structured: bool) -> TranslationResult {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("Unexpected error with status code {}", status));

    let fallback = if structured && message.to_lowercase().contains("exception") {
        DefaultPrompt::Exception
    } else {
        DefaultPrompt::Refusal
    };

    TranslationResult::ApiError { message, fallback }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chat_body(content: Value) -> String {
        json!({ "choices": [ { "message": { "role": "assistant", "content": content } } ] })
            .to_string()
    }

    #[test]
    fn t_plain_success_is_trimmed() {
        let result = classify_response(200, &chat_body(json!("  Hello \n")), false);
        assert_eq!(result, TranslationResult::Success("Hello".to_string()));
    }

    #[test]
    fn t_structured_success() {
        let inner = json!({ "translated_text": "a red fox" }).to_string();
        let result = classify_response(200, &chat_body(json!(inner)), true);
        assert_eq!(result, TranslationResult::Success("a red fox".to_string()));
    }

    #[test]
    fn t_structured_empty_is_empty_translation() {
        let result = classify_response(200, &chat_body(json!(r#"{"translated_text": ""}"#)), true);
        assert_eq!(result, TranslationResult::EmptyTranslation);
    }

    #[test]
    fn t_structured_inner_garbage_is_malformed() {
        let result = classify_response(200, &chat_body(json!("a red fox")), true);
        assert!(matches!(result, TranslationResult::MalformedResponse(_)));
        assert_eq!(result.resolved_text(), "a cute 3D style yellow kitten");
    }

    #[test]
    fn t_plain_mode_does_not_parse_inner_json() {
        let raw = r#"{"translated_text": "x"}"#;
        let result = classify_response(200, &chat_body(json!(raw)), false);
        assert_eq!(result, TranslationResult::Success(raw.to_string()));
    }

    #[test]
    fn t_unparseable_body_is_malformed() {
        let result = classify_response(200, "<html>bad gateway</html>", false);
        assert!(matches!(result, TranslationResult::MalformedResponse(_)));
        assert_eq!(result.resolved_text(), "a cute 3D style yellow kitten");
    }

    #[test]
    fn t_error_field_on_200() {
        let body = json!({ "error": { "message": "Rate limit reached" } }).to_string();
        let result = classify_response(200, &body, false);
        assert_eq!(
            result,
            TranslationResult::ApiError {
                message: "Rate limit reached".to_string(),
                fallback: DefaultPrompt::Refusal
            }
        );
    }

    #[test]
    fn t_null_error_field_is_ignored() {
        let body = json!({
            "error": null,
            "choices": [ { "message": { "content": "Hi" } } ]
        })
        .to_string();
        assert_eq!(
            classify_response(200, &body, false),
            TranslationResult::Success("Hi".to_string())
        );
    }

    #[test]
    fn t_model_refusal() {
        let body = json!({
            "choices": [ { "message": { "content": null, "refusal": "I can't help with that." } } ]
        })
        .to_string();
        let result = classify_response(200, &body, true);
        assert!(matches!(
            result,
            TranslationResult::ApiError { fallback: DefaultPrompt::Refusal, .. }
        ));
    }

    #[test]
    fn t_missing_choices_is_malformed() {
        let result = classify_response(200, r#"{"choices": []}"#, false);
        assert!(matches!(result, TranslationResult::MalformedResponse(_)));
    }

    #[test]
    fn t_non_200_with_message_plain_mode() {
        let body = json!({ "error": { "message": "Internal exception occurred" } }).to_string();
        // 非结构化模式下即使包含 exception 也走拒绝默认值
        let result = classify_response(500, &body, false);
        assert_eq!(result.resolved_text(), "a cute 3D style yellow kitten");
    }

    #[test]
    fn t_non_200_exception_message_structured_mode() {
        let body = json!({ "error": { "message": "Upstream EXCEPTION while sampling" } }).to_string();
        let result = classify_response(500, &body, true);
        assert_eq!(
            result,
            TranslationResult::ApiError {
                message: "Upstream EXCEPTION while sampling".to_string(),
                fallback: DefaultPrompt::Exception
            }
        );
    }

    #[test]
    fn t_non_200_generated_message_never_picks_exception_default() {
        // 保留的不对称行为：生成的消息不含 "exception"
        let result = classify_response(503, "Service Unavailable", true);
        assert_eq!(
            result,
            TranslationResult::ApiError {
                message: "Unexpected error with status code 503".to_string(),
                fallback: DefaultPrompt::Refusal
            }
        );
    }
}
