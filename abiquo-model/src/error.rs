//! 数据模型层错误定义

use thiserror::Error;

/// 数据模型层错误类型
#[derive(Error, Debug)]
pub enum ModelError {
    /// 链接的 href 末段不是合法的资源 ID
    #[error("链接格式错误, 无法从 href 提取资源 ID: {href}")]
    MalformedLink { href: String },

    /// 资源缺少必需的链接关系
    ///
    /// 属于契约违反: 要么服务端 API 发生漂移, 要么调用方在资源
    /// 保存之前就使用了需要父链接的操作。不重试, 立即上报。
    #[error("缺少必需的链接关系: {rel}")]
    MissingLink { rel: String },

    /// 资源定义校验失败
    #[error("资源定义非法: {0}")]
    InvalidDefinition(String),

    /// XML 编解码失败
    #[error("XML 编解码失败: {0}")]
    Xml(String),
}

/// 数据模型层结果类型
pub type Result<T> = std::result::Result<T, ModelError>;
