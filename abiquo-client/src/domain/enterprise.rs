//! 企业与用户域对象

use abiquo_model::enterprise::{EnterpriseDto, UserDefinition, UserDto};
use abiquo_model::{rel, Linked};

use crate::client::AbiquoClient;
use crate::error::Result;

/// 企业 (租户)
pub struct Enterprise {
    client: AbiquoClient,
    dto: EnterpriseDto,
}

impl Enterprise {
    pub fn wrap(client: AbiquoClient, dto: EnterpriseDto) -> Self {
        Self { client, dto }
    }

    pub fn dto(&self) -> &EnterpriseDto {
        &self.dto
    }

    pub fn id(&self) -> Option<i32> {
        self.dto.id
    }

    pub fn name(&self) -> &str {
        &self.dto.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.dto.name = name.into();
    }

    /// 企业下的用户
    pub async fn users(&self) -> Result<Vec<User>> {
        let users = self.client.enterprise().list_users(&self.dto).await?;
        Ok(users
            .collection
            .into_iter()
            .map(|dto| User::wrap(self.client.clone(), dto))
            .collect())
    }

    /// 由定义创建用户
    pub async fn create_user(&self, definition: UserDefinition) -> Result<User> {
        let user = definition.build()?;
        let created = self
            .client
            .enterprise()
            .create_user(&self.dto, &user)
            .await?;
        Ok(User::wrap(self.client.clone(), created))
    }

    /// 把本地修改写回服务端
    pub async fn update(&mut self) -> Result<()> {
        self.dto = self
            .client
            .enterprise()
            .update_enterprise(&self.dto)
            .await?;
        Ok(())
    }

    /// 删除企业, 消费域对象
    pub async fn delete(self) -> Result<()> {
        self.client.enterprise().delete_enterprise(&self.dto).await
    }
}

/// 平台用户
pub struct User {
    client: AbiquoClient,
    dto: UserDto,
}

impl User {
    pub fn wrap(client: AbiquoClient, dto: UserDto) -> Self {
        Self { client, dto }
    }

    pub fn dto(&self) -> &UserDto {
        &self.dto
    }

    pub fn id(&self) -> Option<i32> {
        self.dto.id
    }

    pub fn nick(&self) -> &str {
        &self.dto.nick
    }

    pub fn name(&self) -> &str {
        &self.dto.name
    }

    pub fn email(&self) -> Option<&str> {
        self.dto.email.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.dto.active
    }

    /// 所属企业 (必需关系)
    pub async fn enterprise(&self) -> Result<Enterprise> {
        let link = self.dto.required_link(rel::ENTERPRISE)?;
        let dto = self.client.resolve(link).await?;
        Ok(Enterprise::wrap(self.client.clone(), dto))
    }

    /// 把本地修改写回服务端
    pub async fn update(&mut self) -> Result<()> {
        self.dto = self.client.enterprise().update_user(&self.dto).await?;
        Ok(())
    }

    /// 删除用户, 消费域对象
    pub async fn delete(self) -> Result<()> {
        self.client.enterprise().delete_user(&self.dto).await
    }
}
