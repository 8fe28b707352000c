//! 任务查询 API
//!
//! 任务是挂在属主资源 (虚拟机等) 下的只读历史记录, 沿属主的
//! `tasks` 链接导航。轮询与等待见 [`crate::monitor`]。

use abiquo_model::task::{TaskDto, TasksDto};
use abiquo_model::{rel, Linked, RestLink};

use crate::client::AbiquoClient;
use crate::error::Result;

/// 任务查询 API
pub struct TaskApi<'a> {
    client: &'a AbiquoClient,
}

impl<'a> TaskApi<'a> {
    pub(crate) fn new(client: &'a AbiquoClient) -> Self {
        Self { client }
    }

    /// 按链接获取任务
    pub async fn get_task(&self, link: &RestLink) -> Result<TaskDto> {
        self.client.resolve(link).await
    }

    /// 查询资源的任务历史, 最近的任务在前
    pub async fn list_tasks<L: Linked>(&self, owner: &L) -> Result<Vec<TaskDto>> {
        let link = owner.required_link(rel::TASKS)?;
        let tasks: TasksDto = self.client.resolve(link).await?;

        let mut collection = tasks.collection;
        collection.sort_by(|left, right| right.timestamp.cmp(&left.timestamp));
        Ok(collection)
    }
}
