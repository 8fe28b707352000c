//! 虚拟云 API
//!
//! 提供完整的虚拟云资源管理功能, 包括:
//! - 虚拟数据中心/虚拟应用/虚拟机的 CRUD
//! - 虚拟机动作: 部署、反部署、重启、状态切换 (均为异步, 返回
//!   202 任务引用)
//! - 卷与磁盘的创建与挂载替换
//! - 私有网络查询
//!
//! 虚拟数据中心集合是固定入口, 其余资源一律沿链接导航。

use tracing::info;

use abiquo_model::cloud::{
    HardDisksDto, VirtualApplianceDto, VirtualAppliancesDto, VirtualDatacenterDto,
    VirtualDatacentersDto, VirtualMachineDto, VirtualMachineStateDto, VirtualMachineTaskDto,
    VirtualMachinesDto, VolumeDto, VolumesDto,
};
use abiquo_model::network::{NicsDto, VlanNetworkDto, VlanNetworksDto};
use abiquo_model::task::AcceptedRequestDto;
use abiquo_model::{rel, Linked};

use crate::api::options::ListOptions;
use crate::client::AbiquoClient;
use crate::error::Result;

/// 虚拟云 API
pub struct CloudApi<'a> {
    client: &'a AbiquoClient,
}

impl<'a> CloudApi<'a> {
    pub(crate) fn new(client: &'a AbiquoClient) -> Self {
        Self { client }
    }

    // ============================================
    // 虚拟数据中心
    // ============================================

    /// 查询虚拟数据中心列表
    pub async fn list_virtual_datacenters(
        &self,
        options: &ListOptions,
    ) -> Result<VirtualDatacentersDto> {
        let url = options.append_to(&self.client.url("/cloud/virtualdatacenters"));
        self.client.get(&url).await
    }

    /// 获取虚拟数据中心
    pub async fn get_virtual_datacenter(&self, id: i32) -> Result<VirtualDatacenterDto> {
        self.client
            .get(&self.client.url(&format!("/cloud/virtualdatacenters/{id}")))
            .await
    }

    /// 创建虚拟数据中心
    ///
    /// 归属的数据中心与企业通过查询参数指定。
    pub async fn create_virtual_datacenter(
        &self,
        virtual_datacenter: &VirtualDatacenterDto,
        datacenter_id: i32,
        enterprise_id: i32,
    ) -> Result<VirtualDatacenterDto> {
        info!("创建虚拟数据中心: {}", virtual_datacenter.name);
        let url = self.client.url(&format!(
            "/cloud/virtualdatacenters?datacenter={datacenter_id}&enterprise={enterprise_id}"
        ));
        self.client.post(&url, virtual_datacenter).await
    }

    /// 更新虚拟数据中心
    pub async fn update_virtual_datacenter(
        &self,
        virtual_datacenter: &VirtualDatacenterDto,
    ) -> Result<VirtualDatacenterDto> {
        info!("更新虚拟数据中心: {}", virtual_datacenter.name);
        let edit = virtual_datacenter.required_link(rel::EDIT)?;
        self.client.put(&edit.href, virtual_datacenter).await
    }

    /// 删除虚拟数据中心
    pub async fn delete_virtual_datacenter(
        &self,
        virtual_datacenter: &VirtualDatacenterDto,
    ) -> Result<()> {
        info!("删除虚拟数据中心: {}", virtual_datacenter.name);
        let edit = virtual_datacenter.required_link(rel::EDIT)?;
        self.client.delete(&edit.href).await
    }

    /// 虚拟数据中心的默认网络
    ///
    /// 该关系依赖资源状态, 未配置时返回 `None`。
    pub async fn get_default_network(
        &self,
        virtual_datacenter: &VirtualDatacenterDto,
    ) -> Result<Option<VlanNetworkDto>> {
        match virtual_datacenter.find_link(rel::DEFAULT_NETWORK) {
            Some(link) => self.client.resolve_optional(link).await,
            None => Ok(None),
        }
    }

    /// 查询虚拟数据中心的私有网络列表
    pub async fn list_private_networks(
        &self,
        virtual_datacenter: &VirtualDatacenterDto,
    ) -> Result<VlanNetworksDto> {
        let networks = virtual_datacenter.required_link(rel::PRIVATE_NETWORKS)?;
        self.client.resolve(networks).await
    }

    // ============================================
    // 虚拟应用
    // ============================================

    /// 查询虚拟应用列表
    pub async fn list_virtual_appliances(
        &self,
        virtual_datacenter: &VirtualDatacenterDto,
    ) -> Result<VirtualAppliancesDto> {
        let appliances = virtual_datacenter.required_link(rel::VIRTUAL_APPLIANCES)?;
        self.client.resolve(appliances).await
    }

    /// 创建虚拟应用
    pub async fn create_virtual_appliance(
        &self,
        virtual_datacenter: &VirtualDatacenterDto,
        appliance: &VirtualApplianceDto,
    ) -> Result<VirtualApplianceDto> {
        info!("创建虚拟应用: {}", appliance.name);
        let appliances = virtual_datacenter.required_link(rel::VIRTUAL_APPLIANCES)?;
        self.client.post(&appliances.href, appliance).await
    }

    /// 更新虚拟应用
    pub async fn update_virtual_appliance(
        &self,
        appliance: &VirtualApplianceDto,
    ) -> Result<VirtualApplianceDto> {
        info!("更新虚拟应用: {}", appliance.name);
        let edit = appliance.required_link(rel::EDIT)?;
        self.client.put(&edit.href, appliance).await
    }

    /// 删除虚拟应用
    pub async fn delete_virtual_appliance(&self, appliance: &VirtualApplianceDto) -> Result<()> {
        info!("删除虚拟应用: {}", appliance.name);
        let edit = appliance.required_link(rel::EDIT)?;
        self.client.delete(&edit.href).await
    }

    // ============================================
    // 虚拟机
    // ============================================

    /// 查询虚拟应用下的虚拟机列表
    pub async fn list_virtual_machines(
        &self,
        appliance: &VirtualApplianceDto,
    ) -> Result<VirtualMachinesDto> {
        let machines = appliance.required_link(rel::VIRTUAL_MACHINES)?;
        self.client.resolve(machines).await
    }

    /// 创建虚拟机
    pub async fn create_virtual_machine(
        &self,
        appliance: &VirtualApplianceDto,
        machine: &VirtualMachineDto,
    ) -> Result<VirtualMachineDto> {
        info!("创建虚拟机: {}", machine.name);
        let machines = appliance.required_link(rel::VIRTUAL_MACHINES)?;
        self.client.post(&machines.href, machine).await
    }

    /// 更新虚拟机配置
    ///
    /// 异步调用: 202 时返回任务引用, 服务端同步完成时返回 `None`。
    pub async fn update_virtual_machine(
        &self,
        machine: &VirtualMachineDto,
    ) -> Result<Option<AcceptedRequestDto>> {
        info!("更新虚拟机: {}", machine.name);
        let edit = machine.required_link(rel::EDIT)?;
        self.client.put_accepted(&edit.href, machine).await
    }

    /// 删除虚拟机
    pub async fn delete_virtual_machine(&self, machine: &VirtualMachineDto) -> Result<()> {
        info!("删除虚拟机: {}", machine.name);
        let edit = machine.required_link(rel::EDIT)?;
        self.client.delete(&edit.href).await
    }

    /// 查询虚拟机当前状态
    pub async fn get_virtual_machine_state(
        &self,
        machine: &VirtualMachineDto,
    ) -> Result<VirtualMachineStateDto> {
        let state = machine.required_link(rel::STATE)?;
        self.client.resolve(state).await
    }

    /// 切换虚拟机状态
    pub async fn change_virtual_machine_state(
        &self,
        machine: &VirtualMachineDto,
        state: &VirtualMachineStateDto,
    ) -> Result<Option<AcceptedRequestDto>> {
        info!("切换虚拟机状态: {} -> {:?}", machine.name, state.state);
        let link = machine.required_link(rel::STATE)?;
        self.client.put_accepted(&link.href, state).await
    }

    /// 部署虚拟机
    pub async fn deploy_virtual_machine(
        &self,
        machine: &VirtualMachineDto,
        options: &VirtualMachineTaskDto,
    ) -> Result<Option<AcceptedRequestDto>> {
        info!("部署虚拟机: {}", machine.name);
        let deploy = machine.required_link(rel::DEPLOY)?;
        self.client.post_accepted(&deploy.href, options).await
    }

    /// 反部署虚拟机
    pub async fn undeploy_virtual_machine(
        &self,
        machine: &VirtualMachineDto,
        options: &VirtualMachineTaskDto,
    ) -> Result<Option<AcceptedRequestDto>> {
        info!("反部署虚拟机: {}", machine.name);
        let undeploy = machine.required_link(rel::UNDEPLOY)?;
        self.client.post_accepted(&undeploy.href, options).await
    }

    /// 重启虚拟机
    pub async fn reset_virtual_machine(
        &self,
        machine: &VirtualMachineDto,
    ) -> Result<Option<AcceptedRequestDto>> {
        info!("重启虚拟机: {}", machine.name);
        let reset = machine.required_link(rel::RESET)?;
        self.client.post_action(&reset.href).await
    }

    /// 查询虚拟机挂载的网卡
    pub async fn list_attached_nics(&self, machine: &VirtualMachineDto) -> Result<NicsDto> {
        let nics = machine.required_link(rel::NICS)?;
        self.client.resolve(nics).await
    }

    // ============================================
    // 卷与磁盘
    // ============================================

    /// 查询虚拟数据中心的卷列表
    pub async fn list_volumes(
        &self,
        virtual_datacenter: &VirtualDatacenterDto,
    ) -> Result<VolumesDto> {
        let volumes = virtual_datacenter.required_link(rel::VOLUMES)?;
        self.client.resolve(volumes).await
    }

    /// 创建卷
    pub async fn create_volume(
        &self,
        virtual_datacenter: &VirtualDatacenterDto,
        volume: &VolumeDto,
    ) -> Result<VolumeDto> {
        info!("创建卷: {}", volume.name);
        let volumes = virtual_datacenter.required_link(rel::VOLUMES)?;
        self.client.post(&volumes.href, volume).await
    }

    /// 更新卷
    pub async fn update_volume(&self, volume: &VolumeDto) -> Result<Option<AcceptedRequestDto>> {
        info!("更新卷: {}", volume.name);
        let edit = volume.required_link(rel::EDIT)?;
        self.client.put_accepted(&edit.href, volume).await
    }

    /// 删除卷
    pub async fn delete_volume(&self, volume: &VolumeDto) -> Result<()> {
        info!("删除卷: {}", volume.name);
        let edit = volume.required_link(rel::EDIT)?;
        self.client.delete(&edit.href).await
    }

    /// 查询虚拟机挂载的卷
    pub async fn list_attached_volumes(&self, machine: &VirtualMachineDto) -> Result<VolumesDto> {
        let volumes = machine.required_link(rel::VOLUMES)?;
        self.client.resolve(volumes).await
    }

    /// 整组替换虚拟机挂载的卷
    ///
    /// 服务端按提交的集合与当前挂载的差异执行挂载/卸载。
    pub async fn replace_volumes(
        &self,
        machine: &VirtualMachineDto,
        volumes: &VolumesDto,
    ) -> Result<Option<AcceptedRequestDto>> {
        info!("替换虚拟机挂载卷: {}", machine.name);
        let link = machine.required_link(rel::VOLUMES)?;
        self.client.put_accepted(&link.href, volumes).await
    }

    /// 查询虚拟机挂载的磁盘
    pub async fn list_attached_hard_disks(
        &self,
        machine: &VirtualMachineDto,
    ) -> Result<HardDisksDto> {
        let disks = machine.required_link(rel::DISKS)?;
        self.client.resolve(disks).await
    }

    /// 整组替换虚拟机挂载的磁盘
    pub async fn replace_hard_disks(
        &self,
        machine: &VirtualMachineDto,
        disks: &HardDisksDto,
    ) -> Result<Option<AcceptedRequestDto>> {
        info!("替换虚拟机挂载磁盘: {}", machine.name);
        let link = machine.required_link(rel::DISKS)?;
        self.client.put_accepted(&link.href, disks).await
    }
}
