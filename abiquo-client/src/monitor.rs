//! 异步任务监控
//!
//! 把一次 202 Accepted 响应转换为任务终局的轮询状态机:
//!
//! ```text
//! SUBMITTED -> {PENDING, QUEUEING, STARTED, RUNNING, PAUSED}* ->
//!     {FINISHED_SUCCESSFULLY | ABORTED | FAILED | CANCELLED}
//! ```
//!
//! 句柄创建 ([`TaskMonitor::track`]) 不做网络调用; 每个轮询节拍
//! 重新拉取任务状态资源, 观测到终态后记入句柄, 此后不再发起任何
//! 轮询 (终态是吸收态)。超时是本地策略: 服务端任务可能仍在运行,
//! 所以 [`TaskOutcome::TimedOut`] 与任务失败严格区分, 也不会被
//! 记为终局。
//!
//! 等待期间不持有任何锁, 只在 tokio 时钟上休眠, 调用方随时可以
//! 丢弃 future 实现协作式取消。

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use abiquo_model::task::{AcceptedRequestDto, JobDto, TaskDto, TaskState, TaskType};
use abiquo_model::{rel, RestLink};

use crate::client::AbiquoClient;
use crate::error::{AbiquoError, Result};

/// 任务终局
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// 任务成功结束
    Succeeded,

    /// 任务执行失败
    Failed(String),

    /// 任务被服务端中止
    Aborted,

    /// 任务被取消
    Cancelled,

    /// 本地等待超时, 服务端任务可能仍在运行
    TimedOut,
}

impl TaskOutcome {
    fn from_terminal(task: &TaskDto) -> Option<Self> {
        match task.state {
            TaskState::FinishedSuccessfully => Some(TaskOutcome::Succeeded),
            TaskState::Aborted => Some(TaskOutcome::Aborted),
            TaskState::Cancelled => Some(TaskOutcome::Cancelled),
            TaskState::Failed => {
                let reason = task
                    .jobs
                    .collection
                    .iter()
                    .rev()
                    .find(|job| job.state == TaskState::Failed)
                    .and_then(|job| job.description.clone())
                    .unwrap_or_else(|| format!("任务 {} 执行失败", task.task_id));
                Some(TaskOutcome::Failed(reason))
            }
            _ => None,
        }
    }
}

/// 一次轮询观测到的任务快照
#[derive(Debug, Clone)]
pub struct TaskSnapshot {
    /// 任务 ID
    pub task_id: String,

    /// 任务类型
    pub task_type: TaskType,

    /// 观测到的状态
    pub state: TaskState,

    /// 服务端时间戳 (秒)
    pub timestamp: u64,

    /// 子作业, 严格保持服务端返回顺序
    pub jobs: Vec<JobDto>,

    /// 任务表示携带的链接 (取消动作在这里发现)
    pub links: Vec<RestLink>,
}

impl TaskSnapshot {
    fn from_dto(task: TaskDto) -> Self {
        Self {
            task_id: task.task_id,
            task_type: task.task_type,
            state: task.state,
            timestamp: task.timestamp,
            jobs: task.jobs.collection,
            links: task.links,
        }
    }

    /// 已成功结束的作业数, 用于汇报 "第 N 步 / 共 M 步"
    pub fn finished_jobs(&self) -> usize {
        self.jobs
            .iter()
            .filter(|job| job.state == TaskState::FinishedSuccessfully)
            .count()
    }

    /// 作业总数
    pub fn total_jobs(&self) -> usize {
        self.jobs.len()
    }
}

/// 任务轮询句柄
///
/// 由一次 202 响应换取, 记录任务状态资源的地址、最近一次观测和
/// 已到达的终局。句柄只在本地演进, 从不反向写服务端状态。
#[derive(Debug, Clone)]
pub struct TaskHandle {
    task_href: String,
    last: Option<TaskSnapshot>,
    outcome: Option<TaskOutcome>,
}

impl TaskHandle {
    fn new(task_href: String) -> Self {
        Self {
            task_href,
            last: None,
            outcome: None,
        }
    }

    /// 任务状态资源地址
    pub fn task_href(&self) -> &str {
        &self.task_href
    }

    /// 最近一次观测, 尚未轮询过时为 `None`
    pub fn last_snapshot(&self) -> Option<&TaskSnapshot> {
        self.last.as_ref()
    }

    /// 已到达的终局
    pub fn outcome(&self) -> Option<&TaskOutcome> {
        self.outcome.as_ref()
    }

    /// 是否已到达终态
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }
}

/// 异步任务监控器
pub struct TaskMonitor<'a> {
    client: &'a AbiquoClient,
}

impl<'a> TaskMonitor<'a> {
    pub(crate) fn new(client: &'a AbiquoClient) -> Self {
        Self { client }
    }

    /// 把 202 响应包装为任务句柄, 不发起网络调用
    ///
    /// 202 响应缺少 `status` 链接属于契约违反, 立即上报。
    pub fn track(&self, accepted: &AcceptedRequestDto) -> Result<TaskHandle> {
        let link = accepted.status_link()?;
        debug!("跟踪异步任务: {}", link.href);
        Ok(TaskHandle::new(link.href.clone()))
    }

    /// 把变更响应转换为任务句柄
    ///
    /// 用于约定必然异步的动作 (部署、反部署等): 服务端同步完成
    /// 属于协议形态异常。
    pub fn track_required(&self, accepted: Option<AcceptedRequestDto>) -> Result<TaskHandle> {
        let accepted = accepted
            .ok_or_else(|| AbiquoError::Parse("变更请求未返回 202 任务引用".to_string()))?;
        self.track(&accepted)
    }

    /// 单次拉取任务状态
    ///
    /// 终局已记录时直接返回缓存快照, 不再发起请求。已提交的任务
    /// 在终态前返回 404 视为任务蒸发
    /// ([`AbiquoError::TaskVanished`]), 与普通的资源不存在区分。
    pub async fn poll_once(&self, handle: &mut TaskHandle) -> Result<TaskSnapshot> {
        // 终态吸收: 终局与快照总在同一次观测中写入
        if handle.outcome.is_some() {
            if let Some(last) = handle.last.clone() {
                return Ok(last);
            }
        }

        let task: TaskDto = self
            .client
            .get_optional(&handle.task_href)
            .await?
            .ok_or_else(|| AbiquoError::TaskVanished {
                href: handle.task_href.clone(),
            })?;

        let snapshot = TaskSnapshot::from_dto(task.clone());
        debug!(
            "任务 {} 状态: {:?} ({}/{} 作业完成)",
            snapshot.task_id,
            snapshot.state,
            snapshot.finished_jobs(),
            snapshot.total_jobs()
        );

        handle.last = Some(snapshot.clone());
        if let Some(outcome) = TaskOutcome::from_terminal(&task) {
            info!("任务 {} 到达终态: {:?}", snapshot.task_id, outcome);
            handle.outcome = Some(outcome);
        }

        Ok(snapshot)
    }

    /// 阻塞等待任务终局, 轮询间隔取配置的默认值
    pub async fn await_completion(
        &self,
        handle: &mut TaskHandle,
        max_wait: Duration,
    ) -> Result<TaskOutcome> {
        let interval = self.client.config().poll_interval();
        self.await_completion_with(handle, interval, max_wait).await
    }

    /// 阻塞等待任务终局
    ///
    /// 到达 `max_wait` 前按 `interval` 重复拉取同一状态资源;
    /// 超时返回 [`TaskOutcome::TimedOut`] 且之后不再发起轮询。
    /// 轮询自身的传输错误照常上抛, 不会被无限吞掉。
    pub async fn await_completion_with(
        &self,
        handle: &mut TaskHandle,
        interval: Duration,
        max_wait: Duration,
    ) -> Result<TaskOutcome> {
        if let Some(outcome) = handle.outcome.clone() {
            return Ok(outcome);
        }

        let deadline = Instant::now() + max_wait;
        loop {
            self.poll_once(handle).await?;
            if let Some(outcome) = handle.outcome.clone() {
                return Ok(outcome);
            }

            // 下一拍已在截止点之后: 按本地策略放弃等待
            if Instant::now() + interval > deadline {
                warn!("等待任务超时 ({}ms): {}", max_wait.as_millis(), handle.task_href);
                return Ok(TaskOutcome::TimedOut);
            }
            sleep(interval).await;
        }
    }

    /// 尽力而为的任务取消
    ///
    /// 服务端按任务类型决定是否公布 `cancel` 动作链接; 没有公布
    /// 即不支持取消。取消请求发出不代表服务端任务停止, 本地视图
    /// 只在下一次轮询时更新。
    pub async fn cancel(&self, handle: &mut TaskHandle) -> Result<()> {
        if let Some(outcome) = handle.outcome.as_ref() {
            return Err(AbiquoError::Unsupported(format!(
                "任务已到达终态 {outcome:?}, 无法取消"
            )));
        }

        // 取消动作要从任务表示里发现, 还没有观测时先拉一次
        let snapshot = match handle.last.clone() {
            Some(snapshot) => snapshot,
            None => self.poll_once(handle).await?,
        };
        if snapshot.state.is_terminal() {
            return Err(AbiquoError::Unsupported(format!(
                "任务 {} 已到达终态, 无法取消",
                snapshot.task_id
            )));
        }

        let Some(link) = snapshot.links.iter().find(|link| link.rel == rel::CANCEL) else {
            return Err(AbiquoError::Unsupported(format!(
                "任务 {} ({:?}) 不支持取消",
                snapshot.task_id, snapshot.task_type
            )));
        };

        info!("请求取消任务: {}", snapshot.task_id);
        self.client.post_action(&link.href).await?;
        Ok(())
    }
}
