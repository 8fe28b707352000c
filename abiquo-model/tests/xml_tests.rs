//! XML 线格式编解码测试
//!
//! 样例报文的字段与链接布局取自服务端的实际响应形态。

use abiquo_model::cloud::{VirtualDatacenterDto, VirtualMachineDto};
use abiquo_model::infrastructure::{DatacenterDto, HypervisorType};
use abiquo_model::task::{AcceptedRequestDto, TaskDto, TaskState, TaskType};
use abiquo_model::{xml, Linked, XmlResource};

#[test]
fn test_parse_datacenter() {
    let payload = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
        <datacenter>
            <link href="http://localhost/api/admin/datacenters/1" rel="edit"/>
            <link href="http://localhost/api/admin/datacenters/1/racks" rel="racks"/>
            <link href="http://localhost/api/admin/datacenters/1/remoteservices" rel="remoteservices"/>
            <id>1</id>
            <name>DC</name>
            <location>Honolulu</location>
        </datacenter>"#;

    let datacenter: DatacenterDto = xml::parse(payload).unwrap();
    assert_eq!(datacenter.id, Some(1));
    assert_eq!(datacenter.name, "DC");
    assert_eq!(datacenter.location.as_deref(), Some("Honolulu"));
    assert_eq!(datacenter.links.len(), 3);
    assert_eq!(
        datacenter.find_link("racks").unwrap().href,
        "http://localhost/api/admin/datacenters/1/racks"
    );
}

#[test]
fn test_link_collection_preserves_wire_order() {
    let payload = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
        <virtualdatacenter>
            <link href="http://localhost/api/admin/datacenters/1" rel="datacenter"/>
            <link href="http://localhost/api/admin/enterprises/1" rel="enterprise"/>
            <link href="http://localhost/api/cloud/virtualdatacenters/1" rel="edit"/>
            <link href="http://localhost/api/cloud/virtualdatacenters/1/virtualappliances" rel="virtualappliances"/>
            <id>1</id>
            <name>VDC</name>
            <hypervisorType>KVM</hypervisorType>
        </virtualdatacenter>"#;

    let vdc: VirtualDatacenterDto = xml::parse(payload).unwrap();
    let rels: Vec<&str> = vdc.links.iter().map(|link| link.rel.as_str()).collect();
    assert_eq!(
        rels,
        vec!["datacenter", "enterprise", "edit", "virtualappliances"]
    );
    assert_eq!(vdc.hypervisor_type, HypervisorType::Kvm);
}

#[test]
fn test_write_preserves_link_attribute_convention() {
    let vm = VirtualMachineDto {
        links: vec![abiquo_model::RestLink::new(
            "virtualappliance",
            "http://localhost/api/cloud/virtualdatacenters/1/virtualappliances/1",
        )],
        id: Some(1),
        name: "VM".to_string(),
        description: None,
        cpu: 2,
        ram: 1024,
        hd_in_bytes: 0,
        state: None,
        vdrp_port: None,
        vdrp_ip: None,
        uuid: None,
        password: None,
    };

    let body = xml::write(&vm).unwrap();
    assert!(body.starts_with(xml::XML_HEADER));
    assert!(body.contains(r#"rel="virtualappliance""#));
    assert!(body.contains(
        r#"href="http://localhost/api/cloud/virtualdatacenters/1/virtualappliances/1""#
    ));
    assert!(body.contains("<name>VM</name>"));

    // 序列化结果必须能原样解析回来
    let parsed: VirtualMachineDto = xml::parse(&body).unwrap();
    assert_eq!(parsed.name, vm.name);
    assert_eq!(parsed.cpu, 2);
    assert_eq!(parsed.links.len(), 1);
}

#[test]
fn test_parse_task_with_ordered_jobs() {
    let payload = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
        <task>
            <link href="http://localhost/api/cloud/virtualdatacenters/1/virtualappliances/1/virtualmachines/1/tasks/f0e8a8f7" rel="self"/>
            <taskId>f0e8a8f7</taskId>
            <ownerId>1</ownerId>
            <type>DEPLOY</type>
            <state>RUNNING</state>
            <timestamp>1340621265</timestamp>
            <jobs>
                <job>
                    <id>f0e8a8f7.schedule</id>
                    <description>Select physical machine</description>
                    <state>FINISHED_SUCCESSFULLY</state>
                    <timestamp>1340621265</timestamp>
                </job>
                <job>
                    <id>f0e8a8f7.configure</id>
                    <description>Configure hypervisor</description>
                    <state>RUNNING</state>
                    <timestamp>1340621267</timestamp>
                </job>
            </jobs>
        </task>"#;

    let task: TaskDto = xml::parse(payload).unwrap();
    assert_eq!(task.task_id, "f0e8a8f7");
    assert_eq!(task.task_type, TaskType::Deploy);
    assert_eq!(task.state, TaskState::Running);
    assert!(!task.state.is_terminal());

    // 作业顺序即执行顺序, 必须与报文一致
    let ids: Vec<&str> = task
        .jobs
        .collection
        .iter()
        .map(|job| job.id.as_str())
        .collect();
    assert_eq!(ids, vec!["f0e8a8f7.schedule", "f0e8a8f7.configure"]);
    assert_eq!(task.finished_jobs(), 1);
    assert_eq!(task.total_jobs(), 2);
}

#[test]
fn test_parse_task_without_jobs() {
    let payload = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
        <task>
            <taskId>aa11</taskId>
            <ownerId>9</ownerId>
            <type>POWER_ON</type>
            <state>FINISHED_SUCCESSFULLY</state>
            <timestamp>1340621265</timestamp>
        </task>"#;

    // 没有作业的任务以自身状态为准
    let task: TaskDto = xml::parse(payload).unwrap();
    assert_eq!(task.total_jobs(), 0);
    assert!(task.state.is_terminal());
}

#[test]
fn test_parse_accepted_request() {
    let payload = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
        <acceptedrequest>
            <link href="http://localhost/api/cloud/virtualdatacenters/1/virtualappliances/1/virtualmachines/1/tasks/42" rel="status"/>
            <message>You can keep track of the progress in the link</message>
        </acceptedrequest>"#;

    let accepted: AcceptedRequestDto = xml::parse(payload).unwrap();
    let status = accepted.status_link().unwrap();
    assert!(status.href.ends_with("/tasks/42"));
}

#[test]
fn test_media_types_follow_vendor_convention() {
    assert_eq!(
        VirtualMachineDto::MEDIA_TYPE,
        "application/vnd.abiquo.virtualmachine+xml"
    );
    assert_eq!(TaskDto::MEDIA_TYPE, "application/vnd.abiquo.task+xml");
}
