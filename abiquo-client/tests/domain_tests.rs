//! 域对象端到端测试
//!
//! 用脚本化传输串起 "变更 -> 202 -> 轮询 -> 终局" 的完整链路,
//! 以及父子导航的必需/可选链接语义。

mod support;

use std::time::Duration;

use abiquo_model::cloud::{VirtualApplianceDto, VirtualMachineDefinition};
use abiquo_model::{ModelError, RestLink};

use abiquo_client::{AbiquoError, TaskOutcome, VirtualAppliance, VirtualMachine};

use support::{
    accepted_xml, scripted_client, task_xml, virtual_datacenter_xml, virtual_machine_dto,
    virtual_machine_xml,
};

const VM_BASE: &str =
    "http://localhost/api/cloud/virtualdatacenters/1/virtualappliances/1/virtualmachines/1";

fn deployable_vm_links() -> Vec<RestLink> {
    vec![
        RestLink::new("edit", VM_BASE),
        RestLink::new("deploy", format!("{VM_BASE}/action/deploy")),
        RestLink::new("undeploy", format!("{VM_BASE}/action/undeploy")),
        RestLink::new("tasks", format!("{VM_BASE}/tasks")),
    ]
}

#[tokio::test(start_paused = true)]
async fn test_deploy_then_await_preserves_job_order() {
    let (client, transport) = scripted_client();

    // 部署 -> 202, 轮询两次: STARTED, 然后两个作业全部成功
    let task_href = format!("{VM_BASE}/tasks/42");
    transport.push_response_for("/action/deploy", 202, &accepted_xml(&task_href));
    transport.push_response_for("/tasks/42", 200, &task_xml("42", "STARTED", &[]));
    transport.push_response_for(
        "/tasks/42",
        200,
        &task_xml(
            "42",
            "FINISHED_SUCCESSFULLY",
            &[
                ("42.schedule", "FINISHED_SUCCESSFULLY"),
                ("42.configure", "FINISHED_SUCCESSFULLY"),
            ],
        ),
    );

    let vm = VirtualMachine::wrap(client.clone(), virtual_machine_dto(deployable_vm_links()));

    let mut handle = vm.deploy().await.unwrap();
    assert_eq!(handle.task_href(), task_href);

    let outcome = client
        .monitor()
        .await_completion_with(&mut handle, Duration::from_millis(10), Duration::from_secs(10))
        .await
        .unwrap();
    assert_eq!(outcome, TaskOutcome::Succeeded);

    // 部署请求是 POST, 轮询请求走任务链接
    let requests = transport.requests();
    assert_eq!(requests[0].method, "POST");
    assert!(requests[0].url.ends_with("/action/deploy"));
    assert_eq!(requests.len(), 3);

    // 作业顺序必须与服务端返回一致
    let snapshot = handle.last_snapshot().unwrap();
    let ids: Vec<&str> = snapshot.jobs.iter().map(|job| job.id.as_str()).collect();
    assert_eq!(ids, vec!["42.schedule", "42.configure"]);
    assert_eq!(snapshot.finished_jobs(), 2);
}

#[tokio::test]
async fn test_missing_required_parent_link_fails_without_http() {
    let (client, transport) = scripted_client();

    // 缺少 virtualappliance 关系的虚拟机: 契约违反, 不发任何请求
    let vm = VirtualMachine::wrap(client, virtual_machine_dto(deployable_vm_links()));
    let err = vm.virtual_appliance().await.unwrap_err();

    assert!(matches!(
        err,
        AbiquoError::Model(ModelError::MissingLink { ref rel }) if rel == "virtualappliance"
    ));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_parent_resolution_by_link_id() {
    let (client, transport) = scripted_client();
    transport.push_response_for(
        "/cloud/virtualdatacenters/1",
        200,
        &virtual_datacenter_xml(1, "VDC"),
    );

    let mut links = deployable_vm_links();
    links.push(RestLink::new(
        "virtualdatacenter",
        "http://localhost/api/cloud/virtualdatacenters/1",
    ));
    let vm = VirtualMachine::wrap(client, virtual_machine_dto(links));

    let vdc = vm.virtual_datacenter().await.unwrap();
    assert_eq!(vdc.id(), Some(1));
    assert_eq!(vdc.name(), "VDC");
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_malformed_parent_link_is_fatal() {
    let (client, transport) = scripted_client();

    let mut links = deployable_vm_links();
    links.push(RestLink::new(
        "virtualdatacenter",
        "http://localhost/api/cloud/virtualdatacenters/latest",
    ));
    let vm = VirtualMachine::wrap(client, virtual_machine_dto(links));

    let err = vm.virtual_datacenter().await.unwrap_err();
    assert!(matches!(
        err,
        AbiquoError::Model(ModelError::MalformedLink { .. })
    ));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_update_completing_synchronously_returns_no_task() {
    let (client, transport) = scripted_client();
    transport.push_response(200, &virtual_machine_xml(1, "vm"));

    let mut vm = VirtualMachine::wrap(client, virtual_machine_dto(deployable_vm_links()));
    vm.set_cpu(4);

    let handle = vm.update().await.unwrap();
    assert!(handle.is_none());

    let requests = transport.requests();
    assert_eq!(requests[0].method, "PUT");
    // 请求体携带修改后的配置
    assert!(requests[0].body.as_deref().unwrap().contains("<cpu>4</cpu>"));
}

#[tokio::test]
async fn test_update_deferred_by_server_returns_task_handle() {
    let (client, transport) = scripted_client();
    let task_href = format!("{VM_BASE}/tasks/7");
    transport.push_response(202, &accepted_xml(&task_href));

    let vm = VirtualMachine::wrap(client, virtual_machine_dto(deployable_vm_links()));

    let handle = vm.update().await.unwrap().expect("应当返回任务句柄");
    assert_eq!(handle.task_href(), task_href);
}

#[tokio::test]
async fn test_delete_consumes_wrapper() {
    let (client, transport) = scripted_client();
    transport.push_response_for("/virtualmachines/1", 204, "");

    let vm = VirtualMachine::wrap(client, virtual_machine_dto(deployable_vm_links()));
    vm.delete().await.unwrap();
    // vm 已被消费, 删除后的再次使用无法通过编译

    let requests = transport.requests();
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_create_virtual_machine_validates_definition_before_http() {
    let (client, transport) = scripted_client();

    let appliance = VirtualAppliance::wrap(
        client,
        VirtualApplianceDto {
            links: vec![RestLink::new(
                "virtualmachines",
                "http://localhost/api/cloud/virtualdatacenters/1/virtualappliances/1/virtualmachines",
            )],
            id: Some(1),
            name: "VA".to_string(),
        },
    );

    let err = appliance
        .create_virtual_machine(VirtualMachineDefinition::new("vm", 0, 512))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AbiquoError::Model(ModelError::InvalidDefinition(_))
    ));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_create_virtual_machine_on_unsaved_appliance_fails_fast() {
    let (client, transport) = scripted_client();

    // 未保存的虚拟应用没有虚拟机集合链接
    let appliance = VirtualAppliance::wrap(
        client,
        VirtualApplianceDto {
            links: Vec::new(),
            id: None,
            name: "VA".to_string(),
        },
    );

    let err = appliance
        .create_virtual_machine(VirtualMachineDefinition::new("vm", 1, 512))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AbiquoError::Model(ModelError::MissingLink { ref rel }) if rel == "virtualmachines"
    ));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_deploy_and_wait_helper() {
    let (client, transport) = scripted_client();
    let task_href = format!("{VM_BASE}/tasks/42");
    transport.push_response_for("/action/deploy", 202, &accepted_xml(&task_href));
    transport.push_response_for("/tasks/42", 200, &task_xml("42", "FINISHED_SUCCESSFULLY", &[]));

    let vm = VirtualMachine::wrap(client, virtual_machine_dto(deployable_vm_links()));

    let outcome = vm.deploy_and_wait(Duration::from_secs(600)).await.unwrap();
    assert_eq!(outcome, TaskOutcome::Succeeded);
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_deploy_without_202_is_protocol_violation() {
    let (client, transport) = scripted_client();
    // 服务端违反约定同步返回 204
    transport.push_response(204, "");

    let vm = VirtualMachine::wrap(client, virtual_machine_dto(deployable_vm_links()));

    let err = vm.deploy().await.unwrap_err();
    assert!(matches!(err, AbiquoError::Parse(_)));
}
