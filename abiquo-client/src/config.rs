//! 客户端配置

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AbiquoError, Result};

/// 默认连接超时 (秒)
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

/// 默认请求超时 (秒)
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// 默认轮询间隔 (毫秒), 厂商推荐值
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;

/// Abiquo 客户端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbiquoConfig {
    /// API 入口, 例如 `http://abiquo.example.com/api`
    pub endpoint: Url,

    /// 登录标识
    pub identity: String,

    /// 登录凭据
    pub credential: String,

    /// 连接超时 (秒)
    pub connect_timeout: u64,

    /// 请求超时 (秒)
    pub request_timeout: u64,

    /// 任务轮询间隔 (毫秒)
    pub poll_interval_ms: u64,

    /// 是否校验 SSL 证书
    pub verify_ssl: bool,
}

impl AbiquoConfig {
    /// 以默认超时创建配置
    pub fn new(endpoint: Url, identity: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            endpoint,
            identity: identity.into(),
            credential: credential.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            verify_ssl: true,
        }
    }

    /// 连接超时
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    /// 请求超时
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// 轮询间隔
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// 构造客户端前的一次性校验
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.endpoint.scheme(), "http" | "https") {
            return Err(AbiquoError::Config(format!(
                "API 入口必须是 http/https 地址: {}",
                self.endpoint
            )));
        }
        if self.identity.is_empty() {
            return Err(AbiquoError::Config("登录标识不能为空".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(AbiquoError::Config("轮询间隔必须为正".into()));
        }
        Ok(())
    }
}
