//! 虚拟云域对象
//!
//! 虚拟机是动作最丰富的域对象: 部署/反部署/重启/状态切换都是
//! 异步调用, 交还任务句柄由调用方决定轮询或等待。

use std::time::Duration;

use abiquo_model::cloud::{
    HardDiskDto, VirtualApplianceDto, VirtualDatacenterDto, VirtualMachineDefinition,
    VirtualMachineDto, VirtualMachineState, VirtualMachineStateDto, VirtualMachineTaskDto,
    VolumeDefinition, VolumeDto,
};
use abiquo_model::network::{NicDto, VlanNetworkDto};
use abiquo_model::task::TaskDto;
use abiquo_model::{rel, Linked};

use crate::client::AbiquoClient;
use crate::domain::enterprise::Enterprise;
use crate::domain::infrastructure::Datacenter;
use crate::error::Result;
use crate::monitor::{TaskHandle, TaskOutcome};

/// 虚拟数据中心
#[derive(Debug)]
pub struct VirtualDatacenter {
    client: AbiquoClient,
    dto: VirtualDatacenterDto,
}

impl VirtualDatacenter {
    pub fn wrap(client: AbiquoClient, dto: VirtualDatacenterDto) -> Self {
        Self { client, dto }
    }

    pub fn dto(&self) -> &VirtualDatacenterDto {
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

    /// 所属企业 (必需关系)
    pub async fn enterprise(&self) -> Result<Enterprise> {
        let link = self.dto.required_link(rel::ENTERPRISE)?;
        let dto = self.client.resolve(link).await?;
        Ok(Enterprise::wrap(self.client.clone(), dto))
    }

    /// 承载的物理数据中心 (必需关系)
    pub async fn datacenter(&self) -> Result<Datacenter> {
        let link = self.dto.required_link(rel::DATACENTER)?;
        let dto = self.client.resolve(link).await?;
        Ok(Datacenter::wrap(self.client.clone(), dto))
    }

    /// 默认网络, 未配置时为 `None` (可选关系)
    pub async fn default_network(&self) -> Result<Option<VlanNetworkDto>> {
        self.client.cloud().get_default_network(&self.dto).await
    }

    /// 私有网络列表
    pub async fn private_networks(&self) -> Result<Vec<VlanNetworkDto>> {
        let networks = self.client.cloud().list_private_networks(&self.dto).await?;
        Ok(networks.collection)
    }

    /// 虚拟应用列表
    pub async fn virtual_appliances(&self) -> Result<Vec<VirtualAppliance>> {
        let appliances = self
            .client
            .cloud()
            .list_virtual_appliances(&self.dto)
            .await?;
        Ok(appliances
            .collection
            .into_iter()
            .map(|dto| VirtualAppliance::wrap(self.client.clone(), dto))
            .collect())
    }

    /// 创建虚拟应用
    pub async fn create_virtual_appliance(&self, name: impl Into<String>) -> Result<VirtualAppliance> {
        let appliance = VirtualApplianceDto {
            links: Vec::new(),
            id: None,
            name: name.into(),
        };
        let created = self
            .client
            .cloud()
            .create_virtual_appliance(&self.dto, &appliance)
            .await?;
        Ok(VirtualAppliance::wrap(self.client.clone(), created))
    }

    /// 卷列表
    pub async fn volumes(&self) -> Result<Vec<Volume>> {
        let volumes = self.client.cloud().list_volumes(&self.dto).await?;
        Ok(volumes
            .collection
            .into_iter()
            .map(|dto| Volume::wrap(self.client.clone(), dto))
            .collect())
    }

    /// 创建卷
    pub async fn create_volume(&self, definition: VolumeDefinition) -> Result<Volume> {
        let volume = definition.build()?;
        let created = self
            .client
            .cloud()
            .create_volume(&self.dto, &volume)
            .await?;
        Ok(Volume::wrap(self.client.clone(), created))
    }

    /// 把本地修改写回服务端
    pub async fn update(&mut self) -> Result<()> {
        self.dto = self
            .client
            .cloud()
            .update_virtual_datacenter(&self.dto)
            .await?;
        Ok(())
    }

    /// 删除虚拟数据中心, 消费域对象
    pub async fn delete(self) -> Result<()> {
        self.client
            .cloud()
            .delete_virtual_datacenter(&self.dto)
            .await
    }
}

/// 虚拟应用
#[derive(Debug)]
pub struct VirtualAppliance {
    client: AbiquoClient,
    dto: VirtualApplianceDto,
}

impl VirtualAppliance {
    pub fn wrap(client: AbiquoClient, dto: VirtualApplianceDto) -> Self {
        Self { client, dto }
    }

    pub fn dto(&self) -> &VirtualApplianceDto {
        &self.dto
    }

    pub fn id(&self) -> Option<i32> {
        self.dto.id
    }

    pub fn name(&self) -> &str {
        &self.dto.name
    }

    /// 所属虚拟数据中心 (必需关系)
    pub async fn virtual_datacenter(&self) -> Result<VirtualDatacenter> {
        let link = self.dto.required_link(rel::VIRTUAL_DATACENTER)?;
        let dto = self.client.resolve(link).await?;
        Ok(VirtualDatacenter::wrap(self.client.clone(), dto))
    }

    /// 虚拟机列表
    pub async fn virtual_machines(&self) -> Result<Vec<VirtualMachine>> {
        let machines = self.client.cloud().list_virtual_machines(&self.dto).await?;
        Ok(machines
            .collection
            .into_iter()
            .map(|dto| VirtualMachine::wrap(self.client.clone(), dto))
            .collect())
    }

    /// 由定义创建虚拟机
    ///
    /// 定义在构造边界一次性校验; 虚拟应用尚未保存 (没有虚拟机
    /// 集合链接) 时不发起任何网络调用就报契约违反。
    pub async fn create_virtual_machine(
        &self,
        definition: VirtualMachineDefinition,
    ) -> Result<VirtualMachine> {
        let machine = definition.build()?;
        let created = self
            .client
            .cloud()
            .create_virtual_machine(&self.dto, &machine)
            .await?;
        Ok(VirtualMachine::wrap(self.client.clone(), created))
    }

    /// 把本地修改写回服务端
    pub async fn update(&mut self) -> Result<()> {
        self.dto = self
            .client
            .cloud()
            .update_virtual_appliance(&self.dto)
            .await?;
        Ok(())
    }

    /// 删除虚拟应用, 消费域对象
    pub async fn delete(self) -> Result<()> {
        self.client.cloud().delete_virtual_appliance(&self.dto).await
    }
}

/// 虚拟机
#[derive(Debug)]
pub struct VirtualMachine {
    client: AbiquoClient,
    dto: VirtualMachineDto,
}

impl VirtualMachine {
    pub fn wrap(client: AbiquoClient, dto: VirtualMachineDto) -> Self {
        Self { client, dto }
    }

    pub fn dto(&self) -> &VirtualMachineDto {
        &self.dto
    }

    pub fn into_dto(self) -> VirtualMachineDto {
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

    pub fn description(&self) -> Option<&str> {
        self.dto.description.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.dto.description = Some(description.into());
    }

    pub fn cpu(&self) -> i32 {
        self.dto.cpu
    }

    pub fn set_cpu(&mut self, cpu: i32) {
        self.dto.cpu = cpu;
    }

    pub fn ram(&self) -> i32 {
        self.dto.ram
    }

    pub fn set_ram(&mut self, ram: i32) {
        self.dto.ram = ram;
    }

    // ============================================
    // 父资源
    // ============================================

    /// 所在虚拟应用 (必需关系)
    pub async fn virtual_appliance(&self) -> Result<VirtualAppliance> {
        let link = self.dto.required_link(rel::VIRTUAL_APPLIANCE)?;
        let dto = self.client.resolve(link).await?;
        Ok(VirtualAppliance::wrap(self.client.clone(), dto))
    }

    /// 所在虚拟数据中心, 由链接的 ID 定位
    pub async fn virtual_datacenter(&self) -> Result<VirtualDatacenter> {
        let id = self.dto.id_from_link(rel::VIRTUAL_DATACENTER)?;
        let dto = self.client.cloud().get_virtual_datacenter(id).await?;
        Ok(VirtualDatacenter::wrap(self.client.clone(), dto))
    }

    /// 所属企业, 由链接的 ID 定位
    pub async fn enterprise(&self) -> Result<Enterprise> {
        let id = self.dto.id_from_link(rel::ENTERPRISE)?;
        let dto = self.client.enterprise().get_enterprise(id).await?;
        Ok(Enterprise::wrap(self.client.clone(), dto))
    }

    // ============================================
    // 子资源
    // ============================================

    /// 任务历史, 最近的在前
    pub async fn tasks(&self) -> Result<Vec<TaskDto>> {
        self.client.tasks().list_tasks(&self.dto).await
    }

    /// 已挂载的卷
    pub async fn attached_volumes(&self) -> Result<Vec<Volume>> {
        let volumes = self.client.cloud().list_attached_volumes(&self.dto).await?;
        Ok(volumes
            .collection
            .into_iter()
            .map(|dto| Volume::wrap(self.client.clone(), dto))
            .collect())
    }

    /// 已挂载的磁盘
    pub async fn attached_hard_disks(&self) -> Result<Vec<HardDisk>> {
        let disks = self
            .client
            .cloud()
            .list_attached_hard_disks(&self.dto)
            .await?;
        Ok(disks
            .collection
            .into_iter()
            .map(|dto| HardDisk::wrap(self.client.clone(), dto))
            .collect())
    }

    /// 已挂载的网卡
    pub async fn attached_nics(&self) -> Result<Vec<NicDto>> {
        let nics = self.client.cloud().list_attached_nics(&self.dto).await?;
        Ok(nics.collection)
    }

    // ============================================
    // 动作
    // ============================================

    /// 查询当前状态
    pub async fn state(&self) -> Result<VirtualMachineState> {
        let state = self
            .client
            .cloud()
            .get_virtual_machine_state(&self.dto)
            .await?;
        Ok(state.state)
    }

    /// 部署虚拟机, 返回任务句柄
    pub async fn deploy(&self) -> Result<TaskHandle> {
        self.deploy_force(false).await
    }

    /// 部署虚拟机, 可突破企业软限额
    pub async fn deploy_force(&self, force_enterprise_soft_limits: bool) -> Result<TaskHandle> {
        let options = VirtualMachineTaskDto::deploy(force_enterprise_soft_limits);
        let accepted = self
            .client
            .cloud()
            .deploy_virtual_machine(&self.dto, &options)
            .await?;
        self.client.monitor().track_required(accepted)
    }

    /// 部署并阻塞等待终局
    pub async fn deploy_and_wait(&self, max_wait: Duration) -> Result<TaskOutcome> {
        let mut handle = self.deploy().await?;
        self.client.monitor().await_completion(&mut handle, max_wait).await
    }

    /// 反部署虚拟机
    pub async fn undeploy(&self) -> Result<TaskHandle> {
        self.undeploy_force(false).await
    }

    /// 强制反部署 (忽略虚拟机当前状态)
    pub async fn undeploy_force(&self, force: bool) -> Result<TaskHandle> {
        let options = VirtualMachineTaskDto::undeploy(force);
        let accepted = self
            .client
            .cloud()
            .undeploy_virtual_machine(&self.dto, &options)
            .await?;
        self.client.monitor().track_required(accepted)
    }

    /// 切换虚拟机状态
    pub async fn change_state(&self, state: VirtualMachineState) -> Result<TaskHandle> {
        let payload = VirtualMachineStateDto::to_state(state);
        let accepted = self
            .client
            .cloud()
            .change_virtual_machine_state(&self.dto, &payload)
            .await?;
        self.client.monitor().track_required(accepted)
    }

    /// 重启虚拟机
    pub async fn reboot(&self) -> Result<TaskHandle> {
        let accepted = self.client.cloud().reset_virtual_machine(&self.dto).await?;
        self.client.monitor().track_required(accepted)
    }

    /// 把本地修改写回服务端
    ///
    /// 异步调用: 服务端延迟处理时返回任务句柄, 同步完成时返回
    /// `None`。并发调用同一服务端资源的写回由服务端按后写覆盖
    /// 处理, 客户端不做本地串行化。
    pub async fn update(&self) -> Result<Option<TaskHandle>> {
        let accepted = self
            .client
            .cloud()
            .update_virtual_machine(&self.dto)
            .await?;
        match accepted {
            Some(accepted) => Ok(Some(self.client.monitor().track(&accepted)?)),
            None => Ok(None),
        }
    }

    /// 删除虚拟机, 消费域对象
    pub async fn delete(self) -> Result<()> {
        self.client.cloud().delete_virtual_machine(&self.dto).await
    }
}

/// 持久存储卷
pub struct Volume {
    client: AbiquoClient,
    dto: VolumeDto,
}

impl Volume {
    pub fn wrap(client: AbiquoClient, dto: VolumeDto) -> Self {
        Self { client, dto }
    }

    pub fn dto(&self) -> &VolumeDto {
        &self.dto
    }

    pub fn id(&self) -> Option<i32> {
        self.dto.id
    }

    pub fn name(&self) -> &str {
        &self.dto.name
    }

    pub fn size_in_mb(&self) -> i64 {
        self.dto.size_in_mb
    }

    /// 所属虚拟数据中心 (必需关系)
    pub async fn virtual_datacenter(&self) -> Result<VirtualDatacenter> {
        let link = self.dto.required_link(rel::VIRTUAL_DATACENTER)?;
        let dto = self.client.resolve(link).await?;
        Ok(VirtualDatacenter::wrap(self.client.clone(), dto))
    }

    /// 把本地修改写回服务端 (扩容可能触发异步任务)
    pub async fn update(&self) -> Result<Option<TaskHandle>> {
        let accepted = self.client.cloud().update_volume(&self.dto).await?;
        match accepted {
            Some(accepted) => Ok(Some(self.client.monitor().track(&accepted)?)),
            None => Ok(None),
        }
    }

    /// 删除卷, 消费域对象
    pub async fn delete(self) -> Result<()> {
        self.client.cloud().delete_volume(&self.dto).await
    }
}

/// 虚拟机本地磁盘
pub struct HardDisk {
    client: AbiquoClient,
    dto: HardDiskDto,
}

impl HardDisk {
    pub fn wrap(client: AbiquoClient, dto: HardDiskDto) -> Self {
        Self { client, dto }
    }

    pub fn dto(&self) -> &HardDiskDto {
        &self.dto
    }

    pub fn id(&self) -> Option<i32> {
        self.dto.id
    }

    pub fn size_in_mb(&self) -> i64 {
        self.dto.size_in_mb
    }

    /// 删除磁盘, 消费域对象
    pub async fn delete(self) -> Result<()> {
        let edit = self.dto.required_link(rel::EDIT)?;
        self.client.delete(&edit.href).await
    }
}
