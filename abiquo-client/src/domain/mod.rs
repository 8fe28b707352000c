//! 域对象层
//!
//! 每个域对象以组合方式持有一份 DTO 和一个共享的客户端上下文,
//! 把字段访问委托给 DTO, 把操作委托给资源 API 与链接解析。
//!
//! 约定:
//! - 父资源导航走链接: 必需关系用 `required_link` + `resolve`,
//!   缺失即契约违反, 不发起任何网络调用就上报; 可选关系用
//!   `resolve_optional`, 404 映射为 `None`
//! - `delete(self)` 消费域对象本身, 删除后的再次使用在编译期
//!   就被拒绝
//! - 返回 202 的操作一律交还任务句柄, 域对象内部从不阻塞等待;
//!   `*_and_wait` 助手显式组合任务监控

pub mod cloud;
pub mod enterprise;
pub mod infrastructure;

pub use cloud::{HardDisk, VirtualAppliance, VirtualDatacenter, VirtualMachine, Volume};
pub use enterprise::{Enterprise, User};
pub use infrastructure::{Datacenter, Machine, Rack, RemoteService};
