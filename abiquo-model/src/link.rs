//! REST 链接模型
//!
//! Abiquo 的每个资源表示中都内嵌一组 `<link rel="..." href="..."/>`
//! 超链接, 资源间的父子导航完全通过链接关系 (rel) 发现, 而不是
//! 拼接固定的 URL 模板。本模块提供链接的线格式模型和纯查找操作,
//! 不做任何网络 I/O。
//!
//! 同一资源内的 rel 不保证唯一 (例如多个 action 链接仅靠 title
//! 区分), 查找语义是按线格式声明顺序的首个匹配。

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// 资源表示中内嵌的一条超链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "link")]
pub struct RestLink {
    /// 链接关系名
    #[serde(rename = "@rel")]
    pub rel: String,

    /// 目标资源地址
    #[serde(rename = "@href")]
    pub href: String,

    /// 目标资源的媒体类型
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    /// 标题, 用于区分同名 rel
    #[serde(rename = "@title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl RestLink {
    /// 创建一条链接
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            media_type: None,
            title: None,
        }
    }

    /// 创建一条带标题的链接
    pub fn titled(rel: impl Into<String>, href: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            media_type: None,
            title: Some(title.into()),
        }
    }

    /// 从 href 的末段路径提取整数资源 ID
    ///
    /// 查询串和片段不参与解析。末段不是整数时返回
    /// [`ModelError::MalformedLink`]。
    pub fn id(&self) -> Result<i32> {
        let path = self
            .href
            .split(['?', '#'])
            .next()
            .unwrap_or("")
            .trim_end_matches('/');

        path.rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
            .ok_or_else(|| ModelError::MalformedLink {
                href: self.href.clone(),
            })
    }
}

/// 携带链接集合的资源
///
/// 链接集合保持服务端返回的声明顺序, 查找操作都是顺序首匹配。
pub trait Linked {
    /// 资源的链接集合 (线格式顺序)
    fn links(&self) -> &[RestLink];

    /// 链接集合的可变引用
    fn links_mut(&mut self) -> &mut Vec<RestLink>;

    /// 按 rel 查找首个匹配的链接
    fn find_link(&self, rel: &str) -> Option<&RestLink> {
        self.links().iter().find(|link| link.rel == rel)
    }

    /// 按 rel + title 查找首个匹配的链接
    fn find_link_titled(&self, rel: &str, title: &str) -> Option<&RestLink> {
        self.links()
            .iter()
            .find(|link| link.rel == rel && link.title.as_deref() == Some(title))
    }

    /// 查找必需的链接, 不存在即为契约违反
    fn required_link(&self, rel: &str) -> Result<&RestLink> {
        self.find_link(rel).ok_or_else(|| ModelError::MissingLink {
            rel: rel.to_string(),
        })
    }

    /// 从必需链接的 href 提取整数资源 ID
    fn id_from_link(&self, rel: &str) -> Result<i32> {
        self.required_link(rel)?.id()
    }

    /// 写入一条链接, 替换已有的同名 rel
    ///
    /// 保存前的资源需要把父资源的 edit 链接以约定的 rel 写入
    /// 自身表示, 服务端据此定位父资源。
    fn set_link(&mut self, link: RestLink) {
        let links = self.links_mut();
        match links.iter_mut().find(|existing| existing.rel == link.rel) {
            Some(existing) => *existing = link,
            None => links.push(link),
        }
    }
}

/// 为 DTO 实现 [`Linked`]
macro_rules! linked_resource {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::link::Linked for $ty {
            fn links(&self) -> &[$crate::link::RestLink] {
                &self.links
            }

            fn links_mut(&mut self) -> &mut Vec<$crate::link::RestLink> {
                &mut self.links
            }
        }
    )+};
}

pub(crate) use linked_resource;
