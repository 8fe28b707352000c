//! Abiquo 云管理平台客户端
//!
//! 把 Abiquo REST API 暴露为类型化的域对象, 资源间的导航完全
//! 沿资源表示内嵌的 `<link/>` 超链接进行。
//!
//! # 功能
//!
//! - **链接解析** ([`AbiquoClient::resolve`]): 按链接关系取回父子
//!   资源, 必需/可选语义由调用点决定
//! - **异步任务监控** ([`monitor::TaskMonitor`]): 把 202 Accepted
//!   响应转换为任务终局的轮询状态机, 支持单次轮询、阻塞等待与
//!   尽力取消
//! - **资源 API** ([`api`]): 基础设施/虚拟云/企业/任务端点封装
//! - **域对象** ([`domain`]): DTO + 上下文的组合包装, 字段访问与
//!   动作的高层入口
//!
//! # 示例
//!
//! ```ignore
//! use std::time::Duration;
//! use abiquo_client::{AbiquoClient, AbiquoConfig};
//! use abiquo_client::monitor::TaskOutcome;
//!
//! // 创建客户端
//! let config = AbiquoConfig::new(
//!     "http://abiquo.example.com/api".parse()?,
//!     "admin",
//!     "xabiquo",
//! );
//! let client = AbiquoClient::new(config)?;
//!
//! // 取虚拟机并部署, 等待任务终局
//! let vdc = client.cloud().get_virtual_datacenter(1).await?;
//! let vapp = &vdc.virtual_appliances().await?[0];
//! let vm = &vapp.virtual_machines().await?[0];
//!
//! match vm.deploy_and_wait(Duration::from_secs(600)).await? {
//!     TaskOutcome::Succeeded => println!("部署完成"),
//!     outcome => eprintln!("部署未成功: {outcome:?}"),
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod monitor;
pub mod transport;

pub use client::AbiquoClient;
pub use config::AbiquoConfig;
pub use error::{AbiquoError, Result};

// 导出域对象
pub use domain::{
    Datacenter, Enterprise, HardDisk, Machine, Rack, RemoteService, User, VirtualAppliance,
    VirtualDatacenter, VirtualMachine, Volume,
};

// 导出任务监控
pub use monitor::{TaskHandle, TaskMonitor, TaskOutcome, TaskSnapshot};
