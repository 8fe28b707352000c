//! 链接关系名常量
//!
//! 服务端在资源表示中使用的 rel 约定, 集中定义避免散落的字面量。

/// 资源自身
pub const SELF: &str = "self";

/// 资源的编辑地址
pub const EDIT: &str = "edit";

/// 异步任务的状态查询地址 (202 响应携带)
pub const STATUS: &str = "status";

/// 任务取消动作 (仅可取消的任务类型携带)
pub const CANCEL: &str = "cancel";

/// 资源的任务列表
pub const TASKS: &str = "tasks";

// --- 父资源 ---

pub const DATACENTER: &str = "datacenter";
pub const RACK: &str = "rack";
pub const MACHINE: &str = "machine";
pub const ENTERPRISE: &str = "enterprise";
pub const VIRTUAL_DATACENTER: &str = "virtualdatacenter";
pub const VIRTUAL_APPLIANCE: &str = "virtualappliance";
pub const TIER: &str = "tier";

// --- 子资源集合 ---

pub const RACKS: &str = "racks";
pub const MACHINES: &str = "machines";
pub const REMOTE_SERVICES: &str = "remoteservices";
pub const VIRTUAL_APPLIANCES: &str = "virtualappliances";
pub const VIRTUAL_MACHINES: &str = "virtualmachines";
pub const VOLUMES: &str = "volumes";
pub const DISKS: &str = "disks";
pub const USERS: &str = "users";
pub const NICS: &str = "nics";
pub const PRIVATE_NETWORKS: &str = "privatenetworks";
pub const DEFAULT_NETWORK: &str = "defaultnetwork";

// --- 动作 ---

pub const STATE: &str = "state";
pub const DEPLOY: &str = "deploy";
pub const UNDEPLOY: &str = "undeploy";
pub const RESET: &str = "reset";
pub const CHECK_STATE: &str = "checkstate";
