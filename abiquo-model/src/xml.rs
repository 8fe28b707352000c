//! XML 编解码
//!
//! Abiquo 的线格式是带厂商媒体类型的 XML, 链接以
//! `<link rel="..." href="..." [title="..."]/>` 属性形式内嵌在资源
//! 根元素中。每个 DTO 通过 [`XmlResource`] 声明自身的媒体类型,
//! 客户端按目标类型发送 Accept 头。

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ModelError, Result};

/// 序列化输出使用的 XML 声明头
pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// 可按 Abiquo 线格式编解码的资源
pub trait XmlResource: Serialize + DeserializeOwned {
    /// 资源的厂商媒体类型, 例如 `application/vnd.abiquo.virtualmachine+xml`
    const MEDIA_TYPE: &'static str;
}

/// 把 XML 响应体解析为目标 DTO
pub fn parse<T: XmlResource>(body: &str) -> Result<T> {
    quick_xml::de::from_str(body).map_err(|err| ModelError::Xml(err.to_string()))
}

/// 把 DTO 序列化为 XML 请求体
pub fn write<T: XmlResource>(resource: &T) -> Result<String> {
    let body =
        quick_xml::se::to_string(resource).map_err(|err| ModelError::Xml(err.to_string()))?;
    Ok(format!("{XML_HEADER}{body}"))
}

/// 为 DTO 声明媒体类型
macro_rules! xml_resource {
    ($($ty:ty => $media:literal),+ $(,)?) => {$(
        impl $crate::xml::XmlResource for $ty {
            const MEDIA_TYPE: &'static str = $media;
        }
    )+};
}

pub(crate) use xml_resource;
