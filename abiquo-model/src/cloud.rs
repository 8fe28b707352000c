//! 虚拟云资源模型
//!
//! 虚拟数据中心、虚拟应用、虚拟机、持久卷与本地磁盘。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ModelError, Result};
use crate::infrastructure::HypervisorType;
use crate::link::{linked_resource, RestLink};
use crate::network::VlanNetworkDto;
use crate::xml::xml_resource;

/// 虚拟机生命周期状态
///
/// 与任务状态无关: 这是虚拟机资源自身的状态, 任务状态描述的是
/// 某次变更操作的进度。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VirtualMachineState {
    NotAllocated,
    Allocated,
    Configured,
    On,
    Off,
    Suspended,
    Paused,
    Locked,
    Unknown,
}

/// 虚拟数据中心
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "virtualdatacenter")]
pub struct VirtualDatacenterDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 虚拟数据中心 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// 名称
    pub name: String,

    /// 承载的虚拟化平台类型
    #[serde(rename = "hypervisorType")]
    pub hypervisor_type: HypervisorType,

    /// 创建时内嵌的默认网络定义
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<VlanNetworkDto>,
}

/// 虚拟数据中心集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "virtualdatacenters")]
pub struct VirtualDatacentersDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    #[serde(rename = "virtualdatacenter", default)]
    pub collection: Vec<VirtualDatacenterDto>,
}

/// 虚拟应用 (虚拟机分组)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "virtualappliance")]
pub struct VirtualApplianceDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 虚拟应用 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// 名称
    pub name: String,
}

/// 虚拟应用集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "virtualappliances")]
pub struct VirtualAppliancesDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    #[serde(rename = "virtualappliance", default)]
    pub collection: Vec<VirtualApplianceDto>,
}

/// 虚拟机
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "virtualmachine")]
pub struct VirtualMachineDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 虚拟机 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// 名称
    pub name: String,

    /// 描述
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// vCPU 数
    #[serde(default)]
    pub cpu: i32,

    /// 内存 (MB)
    #[serde(default)]
    pub ram: i32,

    /// 系统盘大小 (字节), 由模板决定的只读字段
    #[serde(rename = "hdInBytes", default)]
    pub hd_in_bytes: i64,

    /// 生命周期状态
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<VirtualMachineState>,

    /// 远程控制台端口
    #[serde(rename = "vdrpPort", default, skip_serializing_if = "Option::is_none")]
    pub vdrp_port: Option<i32>,

    /// 远程控制台地址
    #[serde(rename = "vdrpIP", default, skip_serializing_if = "Option::is_none")]
    pub vdrp_ip: Option<String>,

    /// 平台内部 UUID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,

    /// 控制台口令
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// 虚拟机集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "virtualmachines")]
pub struct VirtualMachinesDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    #[serde(rename = "virtualmachine", default)]
    pub collection: Vec<VirtualMachineDto>,
}

/// 虚拟机状态查询/变更的载荷
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "virtualmachinestate")]
pub struct VirtualMachineStateDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 目标状态
    pub state: VirtualMachineState,
}

impl VirtualMachineStateDto {
    /// 构造状态变更载荷
    pub fn to_state(state: VirtualMachineState) -> Self {
        Self {
            links: Vec::new(),
            state,
        }
    }
}

/// 部署/反部署动作的选项载荷
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "virtualmachinetask")]
pub struct VirtualMachineTaskDto {
    /// 允许突破企业软限额
    #[serde(
        rename = "forceEnterpriseSoftLimits",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub force_enterprise_soft_limits: Option<bool>,

    /// 强制反部署 (忽略虚拟机当前状态)
    #[serde(rename = "forceUndeploy", default, skip_serializing_if = "Option::is_none")]
    pub force_undeploy: Option<bool>,
}

impl VirtualMachineTaskDto {
    /// 部署选项
    pub fn deploy(force_enterprise_soft_limits: bool) -> Self {
        Self {
            force_enterprise_soft_limits: Some(force_enterprise_soft_limits),
            force_undeploy: None,
        }
    }

    /// 反部署选项
    pub fn undeploy(force: bool) -> Self {
        Self {
            force_enterprise_soft_limits: None,
            force_undeploy: Some(force),
        }
    }
}

/// 卷状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolumeState {
    Detached,
    Attached,
}

/// 持久存储卷
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "volume")]
pub struct VolumeDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 卷 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// 名称
    pub name: String,

    /// 容量 (MB)
    #[serde(rename = "sizeInMB", default)]
    pub size_in_mb: i64,

    /// 挂载状态
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<VolumeState>,
}

/// 卷集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "volumes")]
pub struct VolumesDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    #[serde(rename = "volume", default)]
    pub collection: Vec<VolumeDto>,
}

/// 虚拟机本地磁盘
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "disk")]
pub struct HardDiskDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 磁盘 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// 容量 (MB)
    #[serde(rename = "sizeInMb", default)]
    pub size_in_mb: i64,

    /// 挂载顺序
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i32>,
}

/// 磁盘集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "disks")]
pub struct HardDisksDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    #[serde(rename = "disk", default)]
    pub collection: Vec<HardDiskDto>,
}

/// 虚拟数据中心定义
#[derive(Debug, Clone)]
pub struct VirtualDatacenterDefinition {
    pub name: String,
    pub hypervisor_type: HypervisorType,
    /// 默认私有网络, 创建时内嵌提交
    pub network: Option<VlanNetworkDto>,
}

impl VirtualDatacenterDefinition {
    pub fn new(name: impl Into<String>, hypervisor_type: HypervisorType) -> Self {
        Self {
            name: name.into(),
            hypervisor_type,
            network: None,
        }
    }

    /// 校验并生成待保存的 DTO
    pub fn build(self) -> Result<VirtualDatacenterDto> {
        if self.name.trim().is_empty() {
            return Err(ModelError::InvalidDefinition(
                "虚拟数据中心名称不能为空".into(),
            ));
        }

        Ok(VirtualDatacenterDto {
            links: Vec::new(),
            id: None,
            name: self.name,
            hypervisor_type: self.hypervisor_type,
            network: self.network,
        })
    }
}

/// 虚拟机定义
///
/// 原平台通过可变 Builder 逐字段拼装; 这里改为不可变定义结构,
/// 必填项在 `build` 边界一次性校验。
#[derive(Debug, Clone)]
pub struct VirtualMachineDefinition {
    pub name: String,
    pub description: Option<String>,
    pub cpu: i32,
    pub ram: i32,
    pub password: Option<String>,
}

impl VirtualMachineDefinition {
    pub fn new(name: impl Into<String>, cpu: i32, ram: i32) -> Self {
        Self {
            name: name.into(),
            description: None,
            cpu,
            ram,
            password: None,
        }
    }

    /// 校验并生成待保存的 DTO
    pub fn build(self) -> Result<VirtualMachineDto> {
        if self.name.trim().is_empty() {
            return Err(ModelError::InvalidDefinition("虚拟机名称不能为空".into()));
        }
        if self.cpu <= 0 {
            return Err(ModelError::InvalidDefinition(format!(
                "vCPU 数必须为正: {}",
                self.cpu
            )));
        }
        if self.ram <= 0 {
            return Err(ModelError::InvalidDefinition(format!(
                "内存必须为正: {} MB",
                self.ram
            )));
        }

        Ok(VirtualMachineDto {
            links: Vec::new(),
            id: None,
            name: self.name,
            description: self.description,
            cpu: self.cpu,
            ram: self.ram,
            hd_in_bytes: 0,
            state: None,
            vdrp_port: None,
            vdrp_ip: None,
            uuid: None,
            password: self.password,
        })
    }
}

/// 卷定义
#[derive(Debug, Clone)]
pub struct VolumeDefinition {
    pub name: String,
    pub size_in_mb: i64,
}

impl VolumeDefinition {
    pub fn new(name: impl Into<String>, size_in_mb: i64) -> Self {
        Self {
            name: name.into(),
            size_in_mb,
        }
    }

    /// 校验并生成待保存的 DTO
    pub fn build(self) -> Result<VolumeDto> {
        if self.name.trim().is_empty() {
            return Err(ModelError::InvalidDefinition("卷名称不能为空".into()));
        }
        if self.size_in_mb <= 0 {
            return Err(ModelError::InvalidDefinition(format!(
                "卷容量必须为正: {} MB",
                self.size_in_mb
            )));
        }

        Ok(VolumeDto {
            links: Vec::new(),
            id: None,
            name: self.name,
            size_in_mb: self.size_in_mb,
            state: None,
        })
    }
}

linked_resource!(
    VirtualDatacenterDto,
    VirtualDatacentersDto,
    VirtualApplianceDto,
    VirtualAppliancesDto,
    VirtualMachineDto,
    VirtualMachinesDto,
    VirtualMachineStateDto,
    VolumeDto,
    VolumesDto,
    HardDiskDto,
    HardDisksDto,
);

xml_resource! {
    VirtualDatacenterDto => "application/vnd.abiquo.virtualdatacenter+xml",
    VirtualDatacentersDto => "application/vnd.abiquo.virtualdatacenters+xml",
    VirtualApplianceDto => "application/vnd.abiquo.virtualappliance+xml",
    VirtualAppliancesDto => "application/vnd.abiquo.virtualappliances+xml",
    VirtualMachineDto => "application/vnd.abiquo.virtualmachine+xml",
    VirtualMachinesDto => "application/vnd.abiquo.virtualmachines+xml",
    VirtualMachineStateDto => "application/vnd.abiquo.virtualmachinestate+xml",
    VirtualMachineTaskDto => "application/vnd.abiquo.virtualmachinetask+xml",
    VolumeDto => "application/vnd.abiquo.volume+xml",
    VolumesDto => "application/vnd.abiquo.volumes+xml",
    HardDiskDto => "application/vnd.abiquo.harddisk+xml",
    HardDisksDto => "application/vnd.abiquo.harddisks+xml",
}
