//! 网络资源模型

use serde::{Deserialize, Serialize};

use crate::link::{linked_resource, RestLink};
use crate::xml::xml_resource;

/// 网络类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkType {
    Internal,
    External,
    Public,
    Unmanaged,
}

/// VLAN 网络
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "network")]
pub struct VlanNetworkDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 网络 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// 网络名称
    pub name: String,

    /// 网段地址
    pub address: String,

    /// 掩码位数
    pub mask: i32,

    /// 网关地址
    pub gateway: String,

    /// 首选 DNS
    #[serde(rename = "primaryDNS", default, skip_serializing_if = "Option::is_none")]
    pub primary_dns: Option<String>,

    /// 备用 DNS
    #[serde(rename = "secondaryDNS", default, skip_serializing_if = "Option::is_none")]
    pub secondary_dns: Option<String>,

    /// DNS 后缀
    #[serde(rename = "sufixDNS", default, skip_serializing_if = "Option::is_none")]
    pub sufix_dns: Option<String>,

    /// 是否为虚拟数据中心的默认网络
    #[serde(rename = "defaultNetwork", default)]
    pub default_network: bool,

    /// VLAN tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<i32>,

    /// 网络类型
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub network_type: Option<NetworkType>,
}

/// VLAN 网络集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "networks")]
pub struct VlanNetworksDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    #[serde(rename = "network", default)]
    pub collection: Vec<VlanNetworkDto>,
}

/// 虚拟机网卡
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "nic")]
pub struct NicDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 网卡 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// IP 地址
    pub ip: String,

    /// MAC 地址
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,

    /// 接入顺序
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i32>,
}

/// 网卡集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "nics")]
pub struct NicsDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    #[serde(rename = "nic", default)]
    pub collection: Vec<NicDto>,
}

linked_resource!(VlanNetworkDto, VlanNetworksDto, NicDto, NicsDto);

xml_resource! {
    VlanNetworkDto => "application/vnd.abiquo.virtualnetwork+xml",
    VlanNetworksDto => "application/vnd.abiquo.virtualnetworks+xml",
    NicDto => "application/vnd.abiquo.nic+xml",
    NicsDto => "application/vnd.abiquo.nics+xml",
}
