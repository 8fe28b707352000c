//! 物理基础设施域对象

use abiquo_model::infrastructure::{
    DatacenterDto, MachineDto, MachineState, RackDefinition, RackDto, RemoteServiceDto,
    RemoteServiceType,
};
use abiquo_model::{rel, Linked};

use crate::client::AbiquoClient;
use crate::error::Result;

/// 数据中心
pub struct Datacenter {
    client: AbiquoClient,
    dto: DatacenterDto,
}

impl Datacenter {
    /// 包装已获取的 DTO
    pub fn wrap(client: AbiquoClient, dto: DatacenterDto) -> Self {
        Self { client, dto }
    }

    pub fn dto(&self) -> &DatacenterDto {
        &self.dto
    }

    pub fn into_dto(self) -> DatacenterDto {
        self.dto
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

    pub fn location(&self) -> Option<&str> {
        self.dto.location.as_deref()
    }

    /// 把本地修改写回服务端
    pub async fn update(&mut self) -> Result<()> {
        self.dto = self
            .client
            .infrastructure()
            .update_datacenter(&self.dto)
            .await?;
        Ok(())
    }

    /// 删除数据中心, 消费域对象
    pub async fn delete(self) -> Result<()> {
        self.client
            .infrastructure()
            .delete_datacenter(&self.dto)
            .await
    }

    /// 数据中心下的机架
    pub async fn racks(&self) -> Result<Vec<Rack>> {
        let racks = self.client.infrastructure().list_racks(&self.dto).await?;
        Ok(racks
            .collection
            .into_iter()
            .map(|dto| Rack::wrap(self.client.clone(), dto))
            .collect())
    }

    /// 创建机架
    pub async fn create_rack(&self, definition: RackDefinition) -> Result<Rack> {
        let rack = definition.build()?;
        let created = self
            .client
            .infrastructure()
            .create_rack(&self.dto, &rack)
            .await?;
        Ok(Rack::wrap(self.client.clone(), created))
    }

    /// 数据中心的远程服务
    pub async fn remote_services(&self) -> Result<Vec<RemoteService>> {
        let services = self
            .client
            .infrastructure()
            .list_remote_services(&self.dto)
            .await?;
        Ok(services
            .collection
            .into_iter()
            .map(|dto| RemoteService::wrap(self.client.clone(), dto))
            .collect())
    }
}

/// 机架
pub struct Rack {
    client: AbiquoClient,
    dto: RackDto,
}

impl Rack {
    pub fn wrap(client: AbiquoClient, dto: RackDto) -> Self {
        Self { client, dto }
    }

    pub fn dto(&self) -> &RackDto {
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

    /// 所属数据中心 (必需关系)
    pub async fn datacenter(&self) -> Result<Datacenter> {
        let link = self.dto.required_link(rel::DATACENTER)?;
        let dto = self.client.resolve(link).await?;
        Ok(Datacenter::wrap(self.client.clone(), dto))
    }

    /// 机架上的物理机
    pub async fn machines(&self) -> Result<Vec<Machine>> {
        let machines = self.client.infrastructure().list_machines(&self.dto).await?;
        Ok(machines
            .collection
            .into_iter()
            .map(|dto| Machine::wrap(self.client.clone(), dto))
            .collect())
    }

    /// 把本地修改写回服务端
    pub async fn update(&mut self) -> Result<()> {
        self.dto = self.client.infrastructure().update_rack(&self.dto).await?;
        Ok(())
    }

    /// 删除机架, 消费域对象
    pub async fn delete(self) -> Result<()> {
        self.client.infrastructure().delete_rack(&self.dto).await
    }
}

/// 物理机
pub struct Machine {
    client: AbiquoClient,
    dto: MachineDto,
}

impl Machine {
    pub fn wrap(client: AbiquoClient, dto: MachineDto) -> Self {
        Self { client, dto }
    }

    pub fn dto(&self) -> &MachineDto {
        &self.dto
    }

    pub fn id(&self) -> Option<i32> {
        self.dto.id
    }

    pub fn name(&self) -> &str {
        &self.dto.name
    }

    pub fn state(&self) -> Option<MachineState> {
        self.dto.state
    }

    /// 所在机架 (必需关系)
    pub async fn rack(&self) -> Result<Rack> {
        let link = self.dto.required_link(rel::RACK)?;
        let dto = self.client.resolve(link).await?;
        Ok(Rack::wrap(self.client.clone(), dto))
    }

    /// 所在数据中心, 由机架链接的 ID 定位
    pub async fn datacenter(&self) -> Result<Datacenter> {
        let id = self.dto.id_from_link(rel::DATACENTER)?;
        let dto = self.client.infrastructure().get_datacenter(id).await?;
        Ok(Datacenter::wrap(self.client.clone(), dto))
    }

    /// 探测物理机的实际纳管状态并同步到本地 DTO
    pub async fn check_state(&mut self) -> Result<MachineState> {
        let state = self
            .client
            .infrastructure()
            .check_machine_state(&self.dto)
            .await?;
        self.dto.state = Some(state.state);
        Ok(state.state)
    }

    /// 把本地修改写回服务端
    pub async fn update(&mut self) -> Result<()> {
        self.dto = self.client.infrastructure().update_machine(&self.dto).await?;
        Ok(())
    }

    /// 移除物理机, 消费域对象
    pub async fn delete(self) -> Result<()> {
        self.client.infrastructure().delete_machine(&self.dto).await
    }
}

/// 远程服务
pub struct RemoteService {
    client: AbiquoClient,
    dto: RemoteServiceDto,
}

impl RemoteService {
    pub fn wrap(client: AbiquoClient, dto: RemoteServiceDto) -> Self {
        Self { client, dto }
    }

    pub fn dto(&self) -> &RemoteServiceDto {
        &self.dto
    }

    pub fn service_type(&self) -> RemoteServiceType {
        self.dto.service_type
    }

    pub fn uri(&self) -> &str {
        &self.dto.uri
    }

    /// 服务是否可用 (状态码 0 表示不可用)
    pub fn is_available(&self) -> bool {
        self.dto.status != 0
    }

    /// 所属数据中心 (必需关系)
    pub async fn datacenter(&self) -> Result<Datacenter> {
        let link = self.dto.required_link(rel::DATACENTER)?;
        let dto = self.client.resolve(link).await?;
        Ok(Datacenter::wrap(self.client.clone(), dto))
    }

    /// 把本地修改写回服务端
    pub async fn update(&mut self) -> Result<()> {
        self.dto = self
            .client
            .infrastructure()
            .update_remote_service(&self.dto)
            .await?;
        Ok(())
    }

    /// 注销远程服务, 消费域对象
    pub async fn delete(self) -> Result<()> {
        self.client
            .infrastructure()
            .delete_remote_service(&self.dto)
            .await
    }
}
