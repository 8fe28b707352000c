//! 测试支撑: 脚本化传输
//!
//! 按脚本顺序回放响应序列, 同时记录所有发出的请求, 供断言
//! 轮询次数、请求路径与 Accept 头。
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use abiquo_client::error::{AbiquoError, Result};
use abiquo_client::transport::{RawRequest, RawResponse, Transport};
use abiquo_client::{AbiquoClient, AbiquoConfig};

/// 记录下来的一次请求
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub accept: Option<&'static str>,
    pub body: Option<String>,
}

enum StepResult {
    Response(u16, String),
    Fail(String),
}

struct Step {
    expect_path: Option<String>,
    result: StepResult,
}

#[derive(Default)]
struct State {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// 脚本化传输, 克隆出的句柄共享同一脚本与请求记录
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    state: Arc<State>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一步响应
    pub fn push_response(&self, status: u16, body: &str) {
        self.state.lock_steps().push_back(Step {
            expect_path: None,
            result: StepResult::Response(status, body.to_string()),
        });
    }

    /// 追加一步响应并校验请求路径后缀
    pub fn push_response_for(&self, path_suffix: &str, status: u16, body: &str) {
        self.state.lock_steps().push_back(Step {
            expect_path: Some(path_suffix.to_string()),
            result: StepResult::Response(status, body.to_string()),
        });
    }

    /// 追加同一响应若干次
    pub fn push_response_times(&self, status: u16, body: &str, times: usize) {
        for _ in 0..times {
            self.push_response(status, body);
        }
    }

    /// 追加一步传输层故障
    pub fn push_failure(&self, message: &str) {
        self.state.lock_steps().push_back(Step {
            expect_path: None,
            result: StepResult::Fail(message.to_string()),
        });
    }

    /// 已发出的请求
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// 已发出的请求数
    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

impl State {
    fn lock_steps(&self) -> std::sync::MutexGuard<'_, VecDeque<Step>> {
        self.steps.lock().unwrap()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: RawRequest) -> Result<RawResponse> {
        self.state.requests.lock().unwrap().push(RecordedRequest {
            method: request.method.to_string(),
            url: request.url.clone(),
            accept: request.accept,
            body: request.body.clone(),
        });

        let step = self
            .state
            .lock_steps()
            .pop_front()
            .unwrap_or_else(|| panic!("脚本之外的请求: {} {}", request.method, request.url));

        if let Some(path) = &step.expect_path {
            assert!(
                request.url.ends_with(path.as_str()),
                "请求路径不符: 期望以 {path} 结尾, 实际 {}",
                request.url
            );
        }

        match step.result {
            StepResult::Response(status, body) => Ok(RawResponse { status, body }),
            StepResult::Fail(message) => Err(AbiquoError::Transport(message)),
        }
    }
}

/// 构造使用脚本化传输的客户端
pub fn scripted_client() -> (AbiquoClient, ScriptedTransport) {
    let transport = ScriptedTransport::new();
    let config = AbiquoConfig::new(
        "http://localhost/api".parse().unwrap(),
        "admin",
        "xabiquo",
    );
    let client = AbiquoClient::with_transport(config, Box::new(transport.clone())).unwrap();
    (client, transport)
}

/// 构造只带指定链接的虚拟机 DTO
pub fn virtual_machine_dto(links: Vec<abiquo_model::RestLink>) -> abiquo_model::cloud::VirtualMachineDto {
    abiquo_model::cloud::VirtualMachineDto {
        links,
        id: Some(1),
        name: "vm".to_string(),
        description: None,
        cpu: 1,
        ram: 512,
        hd_in_bytes: 0,
        state: None,
        vdrp_port: None,
        vdrp_ip: None,
        uuid: None,
        password: None,
    }
}

// ============================================
// XML 样例报文
// ============================================

/// 任务报文
pub fn task_xml(task_id: &str, state: &str, jobs: &[(&str, &str)]) -> String {
    task_xml_with_links(task_id, state, &[], jobs)
}

/// 带链接的任务报文
pub fn task_xml_with_links(
    task_id: &str,
    state: &str,
    links: &[(&str, &str)],
    jobs: &[(&str, &str)],
) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><task>"#);
    for (rel, href) in links {
        xml.push_str(&format!(r#"<link href="{href}" rel="{rel}"/>"#));
    }
    xml.push_str(&format!(
        "<taskId>{task_id}</taskId><ownerId>1</ownerId><type>DEPLOY</type>\
         <state>{state}</state><timestamp>1340621265</timestamp>"
    ));
    if !jobs.is_empty() {
        xml.push_str("<jobs>");
        for (id, job_state) in jobs {
            xml.push_str(&format!(
                "<job><id>{id}</id><state>{job_state}</state><timestamp>1340621265</timestamp></job>"
            ));
        }
        xml.push_str("</jobs>");
    }
    xml.push_str("</task>");
    xml
}

/// 202 Accepted 报文
pub fn accepted_xml(task_href: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><acceptedrequest><link href="{task_href}" rel="status"/><message>You can keep track of the progress in the link</message></acceptedrequest>"#
    )
}

/// 数据中心报文
pub fn datacenter_xml(id: i32, name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><datacenter><link href="http://localhost/api/admin/datacenters/{id}" rel="edit"/><id>{id}</id><name>{name}</name></datacenter>"#
    )
}

/// 虚拟数据中心报文
pub fn virtual_datacenter_xml(id: i32, name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><virtualdatacenter><link href="http://localhost/api/cloud/virtualdatacenters/{id}" rel="edit"/><id>{id}</id><name>{name}</name><hypervisorType>KVM</hypervisorType></virtualdatacenter>"#
    )
}

/// 虚拟机报文
pub fn virtual_machine_xml(id: i32, name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><virtualmachine><link href="http://localhost/api/cloud/virtualdatacenters/1/virtualappliances/1/virtualmachines/{id}" rel="edit"/><id>{id}</id><name>{name}</name><cpu>1</cpu><ram>512</ram></virtualmachine>"#
    )
}
