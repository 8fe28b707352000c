//! 企业与用户资源模型

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::link::{linked_resource, RestLink};
use crate::xml::xml_resource;

/// 企业 (租户)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "enterprise")]
pub struct EnterpriseDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 企业 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// 名称
    pub name: String,

    /// vCPU 软限额, 0 表示不限
    #[serde(rename = "cpuCountSoftLimit", default)]
    pub cpu_soft_limit: i64,

    /// vCPU 硬限额, 0 表示不限
    #[serde(rename = "cpuCountHardLimit", default)]
    pub cpu_hard_limit: i64,

    /// 内存软限额 (MB), 0 表示不限
    #[serde(rename = "ramSoftLimitInMb", default)]
    pub ram_soft_limit_in_mb: i64,

    /// 内存硬限额 (MB), 0 表示不限
    #[serde(rename = "ramHardLimitInMb", default)]
    pub ram_hard_limit_in_mb: i64,
}

/// 企业集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "enterprises")]
pub struct EnterprisesDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    #[serde(rename = "enterprise", default)]
    pub collection: Vec<EnterpriseDto>,
}

/// 平台用户
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "user")]
pub struct UserDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 用户 ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,

    /// 姓名
    pub name: String,

    /// 姓氏
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,

    /// 登录名
    pub nick: String,

    /// 邮箱
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// 登录口令, 服务端响应中不回传
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// 界面语言
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// 是否激活
    #[serde(default)]
    pub active: bool,
}

/// 用户集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "users")]
pub struct UsersDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    #[serde(rename = "user", default)]
    pub collection: Vec<UserDto>,
}

/// 用户定义
#[derive(Debug, Clone)]
pub struct UserDefinition {
    pub name: String,
    pub surname: Option<String>,
    pub nick: String,
    pub email: Option<String>,
    pub password: String,
    pub locale: Option<String>,
}

impl UserDefinition {
    pub fn new(
        name: impl Into<String>,
        nick: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            surname: None,
            nick: nick.into(),
            email: None,
            password: password.into(),
            locale: None,
        }
    }

    /// 校验并生成待保存的 DTO
    pub fn build(self) -> Result<UserDto> {
        if self.nick.trim().is_empty() {
            return Err(ModelError::InvalidDefinition("登录名不能为空".into()));
        }
        if self.password.is_empty() {
            return Err(ModelError::InvalidDefinition("登录口令不能为空".into()));
        }

        Ok(UserDto {
            links: Vec::new(),
            id: None,
            name: self.name,
            surname: self.surname,
            nick: self.nick,
            email: self.email,
            password: Some(self.password),
            locale: self.locale,
            active: true,
        })
    }
}

linked_resource!(EnterpriseDto, EnterprisesDto, UserDto, UsersDto);

xml_resource! {
    EnterpriseDto => "application/vnd.abiquo.enterprise+xml",
    EnterprisesDto => "application/vnd.abiquo.enterprises+xml",
    UserDto => "application/vnd.abiquo.user+xml",
    UsersDto => "application/vnd.abiquo.users+xml",
}
