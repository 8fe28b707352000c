//! 客户端错误定义

use abiquo_model::ModelError;
use thiserror::Error;

/// 客户端错误类型
///
/// 除 4.2 节的轮询循环对同一查询按间隔重发外, 所有错误都直接
/// 上抛给调用方, 客户端不做任何自动重试。
#[derive(Error, Debug)]
pub enum AbiquoError {
    /// 配置校验失败
    #[error("配置错误: {0}")]
    Config(String),

    /// 认证失败 (HTTP 401/403)
    #[error("认证失败: {0}")]
    Auth(String),

    /// 网络/HTTP 层故障, 不含 404
    #[error("传输错误: {0}")]
    Transport(String),

    /// 服务端返回的其他非 2xx 状态
    #[error("API 错误 [{0}]: {1}")]
    Api(u16, String),

    /// 解析目标资源时服务端返回 404
    ///
    /// 可选父资源的查找把它映射为 `None`, 必需父资源的查找按
    /// 错误上抛, 区别由各调用点决定。
    #[error("资源不存在: {0}")]
    NotFound(String),

    /// 响应体不符合预期形态
    #[error("响应解析失败: {0}")]
    Parse(String),

    /// 数据模型层错误 (链接缺失、链接格式、XML 编解码)
    #[error(transparent)]
    Model(#[from] ModelError),

    /// 已提交的任务在到达终态前变得不可达 (轮询 404)
    ///
    /// 与 [`AbiquoError::NotFound`] 严格区分: 任务曾经存在,
    /// 是在服务端过期或被回收了, 而不是从未存在。
    #[error("任务已不可达: {href}")]
    TaskVanished { href: String },

    /// 服务端不支持该操作
    #[error("不支持的操作: {0}")]
    Unsupported(String),
}

/// 客户端结果类型
pub type Result<T> = std::result::Result<T, AbiquoError>;
