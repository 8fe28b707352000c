//! 企业与用户 API

use tracing::info;

use abiquo_model::enterprise::{EnterpriseDto, EnterprisesDto, UserDto, UsersDto};
use abiquo_model::{rel, Linked};

use crate::api::options::ListOptions;
use crate::client::AbiquoClient;
use crate::error::Result;

/// 企业与用户 API
pub struct EnterpriseApi<'a> {
    client: &'a AbiquoClient,
}

impl<'a> EnterpriseApi<'a> {
    pub(crate) fn new(client: &'a AbiquoClient) -> Self {
        Self { client }
    }

    // ============================================
    // 企业
    // ============================================

    /// 查询企业列表
    pub async fn list_enterprises(&self, options: &ListOptions) -> Result<EnterprisesDto> {
        let url = options.append_to(&self.client.url("/admin/enterprises"));
        self.client.get(&url).await
    }

    /// 获取企业
    pub async fn get_enterprise(&self, id: i32) -> Result<EnterpriseDto> {
        self.client
            .get(&self.client.url(&format!("/admin/enterprises/{id}")))
            .await
    }

    /// 创建企业
    pub async fn create_enterprise(&self, enterprise: &EnterpriseDto) -> Result<EnterpriseDto> {
        info!("创建企业: {}", enterprise.name);
        self.client
            .post(&self.client.url("/admin/enterprises"), enterprise)
            .await
    }

    /// 更新企业
    pub async fn update_enterprise(&self, enterprise: &EnterpriseDto) -> Result<EnterpriseDto> {
        info!("更新企业: {}", enterprise.name);
        let edit = enterprise.required_link(rel::EDIT)?;
        self.client.put(&edit.href, enterprise).await
    }

    /// 删除企业
    pub async fn delete_enterprise(&self, enterprise: &EnterpriseDto) -> Result<()> {
        info!("删除企业: {}", enterprise.name);
        let edit = enterprise.required_link(rel::EDIT)?;
        self.client.delete(&edit.href).await
    }

    // ============================================
    // 用户
    // ============================================

    /// 查询企业下的用户列表
    pub async fn list_users(&self, enterprise: &EnterpriseDto) -> Result<UsersDto> {
        let users = enterprise.required_link(rel::USERS)?;
        self.client.resolve(users).await
    }

    /// 创建用户
    pub async fn create_user(&self, enterprise: &EnterpriseDto, user: &UserDto) -> Result<UserDto> {
        info!("创建用户: {}", user.nick);
        let users = enterprise.required_link(rel::USERS)?;
        self.client.post(&users.href, user).await
    }

    /// 更新用户
    pub async fn update_user(&self, user: &UserDto) -> Result<UserDto> {
        info!("更新用户: {}", user.nick);
        let edit = user.required_link(rel::EDIT)?;
        self.client.put(&edit.href, user).await
    }

    /// 删除用户
    pub async fn delete_user(&self, user: &UserDto) -> Result<()> {
        info!("删除用户: {}", user.nick);
        let edit = user.required_link(rel::EDIT)?;
        self.client.delete(&edit.href).await
    }
}
