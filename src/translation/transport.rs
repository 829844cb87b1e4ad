//! 翻译请求的传输层
//!
//! [`TranslationTransport`] 是唯一的网络出口；生产环境用 [`HttpTransport`]，
//! 测试替换为内存实现。

use async_trait::async_trait;
use std::time::Duration;

use crate::models::AppError;
use crate::providers::ProviderRequest;

/// 已收到的 HTTP 响应（任意状态码）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// 网络层失败：连接、超时、读取响应体
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

#[async_trait]
pub trait TranslationTransport: Send + Sync {
    async fn send(&self, request: &ProviderRequest) -> Result<TransportResponse, TransportError>;
}

/// 基于 reqwest 的传输实现
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// 连接超时不超过整体超时，也不超过 30 秒
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let connect_timeout = timeout.min(Duration::from_secs(30));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .use_rustls_tls()
            .build()?;
        tracing::debug!(
            "[Translation] HTTP client ready: timeout={:?}, connect_timeout={:?}",
            timeout,
            connect_timeout
        );
        Ok(Self { client })
    }
}

#[async_trait]
impl TranslationTransport for HttpTransport {
    async fn send(&self, request: &ProviderRequest) -> Result<TransportResponse, TransportError> {
        let mut header_map = reqwest::header::HeaderMap::new();
        for (k, v) in request.headers.iter() {
            if let (Ok(name), Ok(val)) = (
                reqwest::header::HeaderName::from_bytes(k.as_bytes()),
                reqwest::header::HeaderValue::from_str(v),
            ) {
                header_map.insert(name, val);
            } else {
                tracing::warn!("[Translation] dropping invalid header '{}'", k);
            }
        }

        let response = self
            .client
            .post(&request.url)
            .headers(header_map)
            .json(&request.body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}
