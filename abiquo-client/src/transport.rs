//! HTTP 传输层
//!
//! 把 HTTP 往返抽象为 [`Transport`] trait: 上层只依赖
//! `请求 -> {状态码, 响应体}` 这一契约, 生产实现包装 `reqwest`,
//! 测试里可以用脚本化实现回放响应序列。
//!
//! 传输层自身不做重试, 也不解释状态码: 404 与业务错误的映射
//! 属于调用方的逐点策略, 轮询重试只存在于任务监控的循环里。

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tracing::debug;

use crate::config::AbiquoConfig;
use crate::error::{AbiquoError, Result};

/// 传输层请求
#[derive(Debug, Clone)]
pub struct RawRequest {
    /// HTTP 方法
    pub method: Method,

    /// 完整请求地址
    pub url: String,

    /// Accept 头, 由目标 DTO 的媒体类型决定
    pub accept: Option<&'static str>,

    /// Content-Type 头, 有请求体时设置
    pub content_type: Option<&'static str>,

    /// XML 请求体
    pub body: Option<String>,
}

impl RawRequest {
    /// 构造无请求体的请求
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            accept: None,
            content_type: None,
            body: None,
        }
    }
}

/// 传输层响应
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP 状态码
    pub status: u16,

    /// 响应体
    pub body: String,
}

impl RawResponse {
    /// 是否为 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 往返的抽象契约
///
/// 实现必须把网络层故障映射为 [`AbiquoError::Transport`], 把任何
/// 收到响应的情况 (含 4xx/5xx) 作为 `Ok(RawResponse)` 返回。
#[async_trait]
pub trait Transport: Send + Sync {
    /// 执行一次 HTTP 往返
    async fn execute(&self, request: RawRequest) -> Result<RawResponse>;
}

/// 生产环境传输实现
pub struct HttpTransport {
    client: reqwest::Client,
    authorization: String,
}

impl HttpTransport {
    /// 按配置构造, HTTP Basic 认证头在此一次性生成
    pub fn new(config: &AbiquoConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|err| AbiquoError::Transport(err.to_string()))?;

        let token = STANDARD.encode(format!("{}:{}", config.identity, config.credential));

        Ok(Self {
            client,
            authorization: format!("Basic {token}"),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: RawRequest) -> Result<RawResponse> {
        debug!("API 请求: {} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .header(AUTHORIZATION, &self.authorization);

        if let Some(accept) = request.accept {
            builder = builder.header(ACCEPT, accept);
        }
        if let Some(content_type) = request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| AbiquoError::Transport(err.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| AbiquoError::Transport(err.to_string()))?;

        debug!("API 响应: {} ({} 字节)", status, body.len());

        Ok(RawResponse { status, body })
    }
}
