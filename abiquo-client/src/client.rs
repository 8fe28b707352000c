//! Abiquo 客户端核心实现
//!
//! [`AbiquoClient`] 是共享的上下文句柄: 持有传输与配置, 内部以
//! `Arc` 共享, 可被多个域对象并发使用。链接解析 (HATEOAS 导航的
//! I/O 半边) 也在这里: 纯查找在数据模型层, 取回与解析在本层。

use std::sync::Arc;

use reqwest::Method;
use tracing::info;

use abiquo_model::task::AcceptedRequestDto;
use abiquo_model::{xml, RestLink, XmlResource};

use crate::api::{CloudApi, EnterpriseApi, InfrastructureApi, TaskApi};
use crate::config::AbiquoConfig;
use crate::error::{AbiquoError, Result};
use crate::monitor::TaskMonitor;
use crate::transport::{HttpTransport, RawRequest, RawResponse, Transport};

struct ClientInner {
    transport: Box<dyn Transport>,
    config: AbiquoConfig,
}

/// Abiquo 平台客户端
#[derive(Clone)]
pub struct AbiquoClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for AbiquoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbiquoClient")
            .field("endpoint", &self.inner.config.endpoint)
            .finish_non_exhaustive()
    }
}

impl AbiquoClient {
    /// 创建使用 HTTP 传输的客户端
    pub fn new(config: AbiquoConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, Box::new(transport))
    }

    /// 以指定传输创建客户端, 测试中用脚本化传输替换 HTTP
    pub fn with_transport(config: AbiquoConfig, transport: Box<dyn Transport>) -> Result<Self> {
        config.validate()?;
        info!("创建 Abiquo 客户端: {}", config.endpoint);

        Ok(Self {
            inner: Arc::new(ClientInner { transport, config }),
        })
    }

    /// 客户端配置
    pub fn config(&self) -> &AbiquoConfig {
        &self.inner.config
    }

    /// 由 API 相对路径拼出完整地址
    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.inner.config.endpoint.as_str().trim_end_matches('/'),
            path
        )
    }

    // ============================================
    // 资源 API 入口
    // ============================================

    /// 物理基础设施 API
    pub fn infrastructure(&self) -> InfrastructureApi<'_> {
        InfrastructureApi::new(self)
    }

    /// 虚拟云 API
    pub fn cloud(&self) -> CloudApi<'_> {
        CloudApi::new(self)
    }

    /// 企业与用户 API
    pub fn enterprise(&self) -> EnterpriseApi<'_> {
        EnterpriseApi::new(self)
    }

    /// 任务查询 API
    pub fn tasks(&self) -> TaskApi<'_> {
        TaskApi::new(self)
    }

    /// 异步任务监控
    pub fn monitor(&self) -> TaskMonitor<'_> {
        TaskMonitor::new(self)
    }

    // ============================================
    // 链接解析
    // ============================================

    /// 解析链接指向的资源
    ///
    /// 按目标类型的媒体类型发送 Accept 头并解析响应。必需语义:
    /// 404 映射为 [`AbiquoError::NotFound`] 上抛。
    pub async fn resolve<T: XmlResource>(&self, link: &RestLink) -> Result<T> {
        self.get(&link.href).await
    }

    /// 解析链接指向的资源, 可选语义: 404 映射为 `None`
    pub async fn resolve_optional<T: XmlResource>(&self, link: &RestLink) -> Result<Option<T>> {
        self.get_optional(&link.href).await
    }

    // ============================================
    // HTTP 动词
    // ============================================

    pub(crate) async fn get<T: XmlResource>(&self, url: &str) -> Result<T> {
        self.get_optional(url)
            .await?
            .ok_or_else(|| AbiquoError::NotFound(url.to_string()))
    }

    pub(crate) async fn get_optional<T: XmlResource>(&self, url: &str) -> Result<Option<T>> {
        let response = self
            .execute(Method::GET, url, Some(T::MEDIA_TYPE), None, None)
            .await?;

        if response.status == 404 {
            return Ok(None);
        }
        check_status(url, &response)?;
        parse_body(&response).map(Some)
    }

    pub(crate) async fn post<B: XmlResource, T: XmlResource>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let payload = xml::write(body)?;
        let response = self
            .execute(
                Method::POST,
                url,
                Some(T::MEDIA_TYPE),
                Some(B::MEDIA_TYPE),
                Some(payload),
            )
            .await?;

        check_status(url, &response)?;
        parse_body(&response)
    }

    pub(crate) async fn put<B: XmlResource, T: XmlResource>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let payload = xml::write(body)?;
        let response = self
            .execute(
                Method::PUT,
                url,
                Some(T::MEDIA_TYPE),
                Some(B::MEDIA_TYPE),
                Some(payload),
            )
            .await?;

        check_status(url, &response)?;
        parse_body(&response)
    }

    /// POST 变更, 202 表示服务端延迟处理
    pub(crate) async fn post_accepted<B: XmlResource>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Option<AcceptedRequestDto>> {
        let payload = xml::write(body)?;
        let response = self
            .execute(
                Method::POST,
                url,
                Some(AcceptedRequestDto::MEDIA_TYPE),
                Some(B::MEDIA_TYPE),
                Some(payload),
            )
            .await?;

        accepted_from(url, response)
    }

    /// PUT 变更, 202 表示服务端延迟处理
    pub(crate) async fn put_accepted<B: XmlResource>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Option<AcceptedRequestDto>> {
        let payload = xml::write(body)?;
        let response = self
            .execute(
                Method::PUT,
                url,
                Some(AcceptedRequestDto::MEDIA_TYPE),
                Some(B::MEDIA_TYPE),
                Some(payload),
            )
            .await?;

        accepted_from(url, response)
    }

    /// 无请求体的动作 POST
    pub(crate) async fn post_action(&self, url: &str) -> Result<Option<AcceptedRequestDto>> {
        let response = self
            .execute(
                Method::POST,
                url,
                Some(AcceptedRequestDto::MEDIA_TYPE),
                None,
                None,
            )
            .await?;

        accepted_from(url, response)
    }

    pub(crate) async fn delete(&self, url: &str) -> Result<()> {
        let response = self.execute(Method::DELETE, url, None, None, None).await?;
        check_status(url, &response)
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        accept: Option<&'static str>,
        content_type: Option<&'static str>,
        body: Option<String>,
    ) -> Result<RawResponse> {
        self.inner
            .transport
            .execute(RawRequest {
                method,
                url: url.to_string(),
                accept,
                content_type,
                body,
            })
            .await
    }
}

fn parse_body<T: XmlResource>(response: &RawResponse) -> Result<T> {
    xml::parse(&response.body).map_err(|err| AbiquoError::Parse(err.to_string()))
}

fn accepted_from(url: &str, response: RawResponse) -> Result<Option<AcceptedRequestDto>> {
    check_status(url, &response)?;
    if response.status == 202 {
        parse_body(&response).map(Some)
    } else {
        Ok(None)
    }
}

fn check_status(url: &str, response: &RawResponse) -> Result<()> {
    match response.status {
        status if (200..300).contains(&status) => Ok(()),
        401 | 403 => Err(AbiquoError::Auth(format!(
            "{} 被拒绝 ({})",
            url, response.status
        ))),
        404 => Err(AbiquoError::NotFound(url.to_string())),
        status => Err(AbiquoError::Api(status, snippet(&response.body))),
    }
}

/// 错误信息只保留响应体开头, 避免日志被整页 HTML 淹没
fn snippet(body: &str) -> String {
    const LIMIT: usize = 200;
    if body.len() <= LIMIT {
        body.to_string()
    } else {
        let end = (0..=LIMIT).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..end])
    }
}
