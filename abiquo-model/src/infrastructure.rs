//! 物理基础设施资源模型
//!
//! 数据中心、机架、物理机和远程服务。

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::link::{linked_resource, RestLink};
use crate::xml::xml_resource;

/// 虚拟化平台类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HypervisorType {
    #[serde(rename = "KVM")]
    Kvm,
    #[serde(rename = "XEN_3")]
    Xen3,
    #[serde(rename = "VMX_04")]
    Vmx04,
    #[serde(rename = "VBOX")]
    Vbox,
    #[serde(rename = "HYPERV_301")]
    Hyperv301,
    #[serde(rename = "XENSERVER")]
    Xenserver,
}

/// 数据中心
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "datacenter")]
pub struct DatacenterDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 数据中心 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// 名称
    pub name: String,

    /// 地理位置
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// 数据中心集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "datacenters")]
pub struct DatacentersDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    #[serde(rename = "datacenter", default)]
    pub collection: Vec<DatacenterDto>,
}

/// 机架
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "rack")]
pub struct RackDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 机架 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// 名称
    pub name: String,

    /// 简要描述
    #[serde(rename = "shortDescription", default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    /// 可用 VLAN 区间下界
    #[serde(rename = "vlanIdMin", default, skip_serializing_if = "Option::is_none")]
    pub vlan_id_min: Option<i32>,

    /// 可用 VLAN 区间上界
    #[serde(rename = "vlanIdMax", default, skip_serializing_if = "Option::is_none")]
    pub vlan_id_max: Option<i32>,

    /// 是否启用高可用
    #[serde(rename = "haEnabled", default)]
    pub ha_enabled: bool,
}

/// 机架集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "racks")]
pub struct RacksDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    #[serde(rename = "rack", default)]
    pub collection: Vec<RackDto>,
}

/// 物理机纳管状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MachineState {
    Managed,
    NotManaged,
    Provisioned,
    Stopped,
    Halted,
    Unlicensed,
}

/// 物理机
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "machine")]
pub struct MachineDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 物理机 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// 名称
    pub name: String,

    /// 描述
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// 纳管状态
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<MachineState>,

    /// 管理网 IP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    /// 虚拟化平台类型
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub hypervisor_type: Option<HypervisorType>,

    /// 虚拟化平台管理账号
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// 虚拟化平台管理口令
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// 虚拟化平台管理端口
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
}

/// 物理机集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "machines")]
pub struct MachinesDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    #[serde(rename = "machine", default)]
    pub collection: Vec<MachineDto>,
}

/// 物理机状态查询结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "machinestate")]
pub struct MachineStateDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 纳管状态
    pub state: MachineState,
}

/// 远程服务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoteServiceType {
    VirtualFactory,
    VirtualSystemMonitor,
    StorageSystemMonitor,
    NodeCollector,
    ApplianceManager,
    DhcpService,
    BpmService,
}

/// 数据中心的远程服务
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "remoteservice")]
pub struct RemoteServiceDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 远程服务 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// 服务类型
    #[serde(rename = "type")]
    pub service_type: RemoteServiceType,

    /// 服务地址
    pub uri: String,

    /// 可用性状态码, 0 表示不可用
    #[serde(default)]
    pub status: i32,
}

/// 远程服务集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "remoteservices")]
pub struct RemoteServicesDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    #[serde(rename = "remoteservice", default)]
    pub collection: Vec<RemoteServiceDto>,
}

/// 机架定义, 在构造边界一次性校验
#[derive(Debug, Clone)]
pub struct RackDefinition {
    pub name: String,
    pub short_description: Option<String>,
    pub vlan_id_min: Option<i32>,
    pub vlan_id_max: Option<i32>,
    pub ha_enabled: bool,
}

impl RackDefinition {
    /// 创建最小定义
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_description: None,
            vlan_id_min: None,
            vlan_id_max: None,
            ha_enabled: false,
        }
    }

    /// 校验并生成待保存的 DTO
    pub fn build(self) -> Result<RackDto> {
        if self.name.trim().is_empty() {
            return Err(ModelError::InvalidDefinition("机架名称不能为空".into()));
        }
        if let (Some(min), Some(max)) = (self.vlan_id_min, self.vlan_id_max) {
            if min > max {
                return Err(ModelError::InvalidDefinition(format!(
                    "VLAN 区间非法: {min} > {max}"
                )));
            }
        }

        Ok(RackDto {
            links: Vec::new(),
            id: None,
            name: self.name,
            short_description: self.short_description,
            vlan_id_min: self.vlan_id_min,
            vlan_id_max: self.vlan_id_max,
            ha_enabled: self.ha_enabled,
        })
    }
}

linked_resource!(
    DatacenterDto,
    DatacentersDto,
    RackDto,
    RacksDto,
    MachineDto,
    MachinesDto,
    MachineStateDto,
    RemoteServiceDto,
    RemoteServicesDto,
);

xml_resource! {
    DatacenterDto => "application/vnd.abiquo.datacenter+xml",
    DatacentersDto => "application/vnd.abiquo.datacenters+xml",
    RackDto => "application/vnd.abiquo.rack+xml",
    RacksDto => "application/vnd.abiquo.racks+xml",
    MachineDto => "application/vnd.abiquo.machine+xml",
    MachinesDto => "application/vnd.abiquo.machines+xml",
    MachineStateDto => "application/vnd.abiquo.machinestate+xml",
    RemoteServiceDto => "application/vnd.abiquo.remoteservice+xml",
    RemoteServicesDto => "application/vnd.abiquo.remoteservices+xml",
}
