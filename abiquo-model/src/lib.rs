//! Abiquo 平台数据模型层
//!
//! 提供 Abiquo REST API 的线格式模型:
//!
//! - **REST 链接** ([`link`]): 资源表示中内嵌的超链接集合与纯查找
//!   操作, 资源导航的基础
//! - **异步任务** ([`task`]): 任务/作业状态机与 202 Accepted 响应体
//! - **资源 DTO**: 基础设施 ([`infrastructure`])、虚拟云 ([`cloud`])、
//!   网络 ([`network`])、企业与用户 ([`enterprise`])
//! - **XML 编解码** ([`xml`]): 厂商媒体类型与 `<link/>` 属性约定
//!
//! 本层不做任何网络 I/O。

pub mod cloud;
pub mod enterprise;
pub mod error;
pub mod infrastructure;
pub mod link;
pub mod network;
pub mod rel;
pub mod task;
pub mod xml;

pub use error::{ModelError, Result};
pub use link::{Linked, RestLink};
pub use task::{AcceptedRequestDto, JobDto, JobsDto, TaskDto, TaskState, TaskType, TasksDto};
pub use xml::XmlResource;
