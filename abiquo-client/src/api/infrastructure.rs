//! 物理基础设施 API
//!
//! 提供数据中心、机架、物理机与远程服务的管理功能。数据中心
//! 集合是固定入口, 机架/物理机/远程服务一律沿父资源的链接导航。

use tracing::info;

use abiquo_model::infrastructure::{
    DatacenterDto, DatacentersDto, MachineDto, MachineStateDto, MachinesDto, RackDto, RacksDto,
    RemoteServiceDto, RemoteServicesDto,
};
use abiquo_model::{rel, Linked};

use crate::client::AbiquoClient;
use crate::error::Result;

/// 物理基础设施 API
pub struct InfrastructureApi<'a> {
    client: &'a AbiquoClient,
}

impl<'a> InfrastructureApi<'a> {
    pub(crate) fn new(client: &'a AbiquoClient) -> Self {
        Self { client }
    }

    // ============================================
    // 数据中心
    // ============================================

    /// 查询数据中心列表
    pub async fn list_datacenters(&self) -> Result<DatacentersDto> {
        self.client.get(&self.client.url("/admin/datacenters")).await
    }

    /// 获取数据中心
    pub async fn get_datacenter(&self, id: i32) -> Result<DatacenterDto> {
        self.client
            .get(&self.client.url(&format!("/admin/datacenters/{id}")))
            .await
    }

    /// 创建数据中心
    pub async fn create_datacenter(&self, datacenter: &DatacenterDto) -> Result<DatacenterDto> {
        info!("创建数据中心: {}", datacenter.name);
        self.client
            .post(&self.client.url("/admin/datacenters"), datacenter)
            .await
    }

    /// 更新数据中心
    pub async fn update_datacenter(&self, datacenter: &DatacenterDto) -> Result<DatacenterDto> {
        info!("更新数据中心: {}", datacenter.name);
        let edit = datacenter.required_link(rel::EDIT)?;
        self.client.put(&edit.href, datacenter).await
    }

    /// 删除数据中心
    pub async fn delete_datacenter(&self, datacenter: &DatacenterDto) -> Result<()> {
        info!("删除数据中心: {}", datacenter.name);
        let edit = datacenter.required_link(rel::EDIT)?;
        self.client.delete(&edit.href).await
    }

    // ============================================
    // 机架
    // ============================================

    /// 查询数据中心下的机架列表
    pub async fn list_racks(&self, datacenter: &DatacenterDto) -> Result<RacksDto> {
        let racks = datacenter.required_link(rel::RACKS)?;
        self.client.resolve(racks).await
    }

    /// 创建机架
    pub async fn create_rack(&self, datacenter: &DatacenterDto, rack: &RackDto) -> Result<RackDto> {
        info!("创建机架: {}", rack.name);
        let racks = datacenter.required_link(rel::RACKS)?;
        self.client.post(&racks.href, rack).await
    }

    /// 更新机架
    pub async fn update_rack(&self, rack: &RackDto) -> Result<RackDto> {
        info!("更新机架: {}", rack.name);
        let edit = rack.required_link(rel::EDIT)?;
        self.client.put(&edit.href, rack).await
    }

    /// 删除机架
    pub async fn delete_rack(&self, rack: &RackDto) -> Result<()> {
        info!("删除机架: {}", rack.name);
        let edit = rack.required_link(rel::EDIT)?;
        self.client.delete(&edit.href).await
    }

    // ============================================
    // 物理机
    // ============================================

    /// 查询机架下的物理机列表
    pub async fn list_machines(&self, rack: &RackDto) -> Result<MachinesDto> {
        let machines = rack.required_link(rel::MACHINES)?;
        self.client.resolve(machines).await
    }

    /// 纳管物理机
    pub async fn create_machine(&self, rack: &RackDto, machine: &MachineDto) -> Result<MachineDto> {
        info!("纳管物理机: {}", machine.name);
        let machines = rack.required_link(rel::MACHINES)?;
        self.client.post(&machines.href, machine).await
    }

    /// 更新物理机
    pub async fn update_machine(&self, machine: &MachineDto) -> Result<MachineDto> {
        info!("更新物理机: {}", machine.name);
        let edit = machine.required_link(rel::EDIT)?;
        self.client.put(&edit.href, machine).await
    }

    /// 移除物理机
    pub async fn delete_machine(&self, machine: &MachineDto) -> Result<()> {
        info!("移除物理机: {}", machine.name);
        let edit = machine.required_link(rel::EDIT)?;
        self.client.delete(&edit.href).await
    }

    /// 探测物理机的实际纳管状态
    pub async fn check_machine_state(&self, machine: &MachineDto) -> Result<MachineStateDto> {
        let check = machine.required_link(rel::CHECK_STATE)?;
        self.client.resolve(check).await
    }

    // ============================================
    // 远程服务
    // ============================================

    /// 查询数据中心的远程服务列表
    pub async fn list_remote_services(
        &self,
        datacenter: &DatacenterDto,
    ) -> Result<RemoteServicesDto> {
        let services = datacenter.required_link(rel::REMOTE_SERVICES)?;
        self.client.resolve(services).await
    }

    /// 注册远程服务
    pub async fn create_remote_service(
        &self,
        datacenter: &DatacenterDto,
        service: &RemoteServiceDto,
    ) -> Result<RemoteServiceDto> {
        info!("注册远程服务: {:?}", service.service_type);
        let services = datacenter.required_link(rel::REMOTE_SERVICES)?;
        self.client.post(&services.href, service).await
    }

    /// 更新远程服务
    pub async fn update_remote_service(
        &self,
        service: &RemoteServiceDto,
    ) -> Result<RemoteServiceDto> {
        info!("更新远程服务: {:?}", service.service_type);
        let edit = service.required_link(rel::EDIT)?;
        self.client.put(&edit.href, service).await
    }

    /// 注销远程服务
    pub async fn delete_remote_service(&self, service: &RemoteServiceDto) -> Result<()> {
        info!("注销远程服务: {:?}", service.service_type);
        let edit = service.required_link(rel::EDIT)?;
        self.client.delete(&edit.href).await
    }
}
