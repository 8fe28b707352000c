//! 异步任务模型
//!
//! 变更类操作 (部署、反部署、重配置、状态切换) 可能被服务端延迟
//! 处理: 响应 202 并携带一个指向任务状态资源的链接
//! ([`AcceptedRequestDto`])。任务 ([`TaskDto`]) 按执行顺序包含若干
//! 作业 ([`JobDto`]), 二者共用同一个状态枚举。任务状态只会单调地
//! 走向终态, 客户端从不直接写任务状态, 只能重新拉取。

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::link::{linked_resource, Linked, RestLink};
use crate::rel;
use crate::xml::xml_resource;

/// 任务与作业的生命周期状态
///
/// 与服务端的任务状态机一一对应, 终态不可逆。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Pending,
    Queueing,
    Started,
    Running,
    Paused,
    FinishedSuccessfully,
    Aborted,
    Failed,
    Cancelled,
}

impl TaskState {
    /// 是否为终态
    ///
    /// 终态是吸收态: 一旦观测到, 同一任务后续拉取不会再回到
    /// 非终态。
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskState::FinishedSuccessfully
                | TaskState::Aborted
                | TaskState::Failed
                | TaskState::Cancelled
        )
    }
}

/// 任务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    Deploy,
    Undeploy,
    Reconfigure,
    PowerOn,
    PowerOff,
    Pause,
    Resume,
    Reset,
    Snapshot,
    HighAvailability,
}

/// 任务的子作业
///
/// 作业按执行顺序排列, 顺序即服务端返回的线格式顺序, 调用方用
/// 作业下标汇报 "第 N 步 / 共 M 步"。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "job")]
pub struct JobDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 作业 ID
    pub id: String,

    /// 所属任务 ID
    #[serde(rename = "parentTaskId", default, skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<String>,

    /// 作业描述
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// 作业状态
    pub state: TaskState,

    /// 服务端时间戳 (秒)
    #[serde(default)]
    pub timestamp: u64,
}

/// 作业集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "jobs")]
pub struct JobsDto {
    #[serde(rename = "job", default)]
    pub collection: Vec<JobDto>,
}

/// 服务端异步任务
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "task")]
pub struct TaskDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 任务 ID
    #[serde(rename = "taskId")]
    pub task_id: String,

    /// 任务属主 (发起操作的资源) ID
    #[serde(rename = "ownerId")]
    pub owner_id: String,

    /// 发起用户 ID
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// 任务类型
    #[serde(rename = "type")]
    pub task_type: TaskType,

    /// 任务状态
    pub state: TaskState,

    /// 服务端时间戳 (秒)
    #[serde(default)]
    pub timestamp: u64,

    /// 子作业, 按执行顺序
    #[serde(default)]
    pub jobs: JobsDto,
}

impl TaskDto {
    /// 已完成的作业数
    pub fn finished_jobs(&self) -> usize {
        self.jobs
            .collection
            .iter()
            .filter(|job| job.state == TaskState::FinishedSuccessfully)
            .count()
    }

    /// 作业总数
    ///
    /// 没有作业的任务以自身状态为准, 不等待不存在的作业列表。
    pub fn total_jobs(&self) -> usize {
        self.jobs.collection.len()
    }
}

/// 任务集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "tasks")]
pub struct TasksDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    #[serde(rename = "task", default)]
    pub collection: Vec<TaskDto>,
}

/// 202 Accepted 响应体
///
/// 变更请求被服务端延迟处理时返回, 携带指向任务状态资源的
/// `status` 链接。只消费一次, 换取任务句柄后不再变更。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "acceptedrequest")]
pub struct AcceptedRequestDto {
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<RestLink>,

    /// 服务端附带的提示信息
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AcceptedRequestDto {
    /// 任务状态资源的链接, 缺失即为契约违反
    pub fn status_link(&self) -> Result<&RestLink> {
        self.required_link(rel::STATUS)
    }
}

linked_resource!(JobDto, TaskDto, TasksDto, AcceptedRequestDto);

xml_resource! {
    TaskDto => "application/vnd.abiquo.task+xml",
    TasksDto => "application/vnd.abiquo.tasks+xml",
    AcceptedRequestDto => "application/vnd.abiquo.acceptedrequest+xml",
}
