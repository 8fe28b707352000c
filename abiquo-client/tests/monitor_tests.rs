//! 异步任务监控状态机测试
//!
//! 全部在 tokio 的暂停时钟上运行, 轮询间隔与超时按虚拟时间推进。

mod support;

use std::time::Duration;

use abiquo_model::task::AcceptedRequestDto;
use abiquo_model::{ModelError, RestLink};

use abiquo_client::{AbiquoError, TaskOutcome};

use support::{accepted_xml, scripted_client, task_xml, task_xml_with_links};

const TASK_HREF: &str =
    "http://localhost/api/cloud/virtualdatacenters/1/virtualappliances/1/virtualmachines/1/tasks/42";

fn accepted_for(task_href: &str) -> AcceptedRequestDto {
    AcceptedRequestDto {
        links: vec![RestLink::new("status", task_href)],
        message: None,
    }
}

#[tokio::test]
async fn test_track_performs_no_io() {
    let (client, transport) = scripted_client();

    let handle = client.monitor().track(&accepted_for(TASK_HREF)).unwrap();

    assert_eq!(handle.task_href(), TASK_HREF);
    assert!(handle.last_snapshot().is_none());
    assert!(!handle.is_terminal());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_track_without_status_link_is_contract_violation() {
    let (client, transport) = scripted_client();

    let accepted = AcceptedRequestDto {
        links: vec![],
        message: None,
    };
    let err = client.monitor().track(&accepted).unwrap_err();

    assert!(matches!(
        err,
        AbiquoError::Model(ModelError::MissingLink { ref rel }) if rel == "status"
    ));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_scripted_sequence_yields_single_terminal_outcome() {
    let (client, transport) = scripted_client();
    transport.push_response(200, &task_xml("42", "PENDING", &[]));
    transport.push_response(200, &task_xml("42", "QUEUEING", &[]));
    transport.push_response(200, &task_xml("42", "RUNNING", &[]));
    transport.push_response(200, &task_xml("42", "FINISHED_SUCCESSFULLY", &[]));

    let monitor = client.monitor();
    let mut handle = monitor.track(&accepted_for(TASK_HREF)).unwrap();

    let outcome = monitor
        .await_completion_with(&mut handle, Duration::from_millis(10), Duration::from_secs(10))
        .await
        .unwrap();

    assert_eq!(outcome, TaskOutcome::Succeeded);
    assert_eq!(transport.request_count(), 4);

    // 终态吸收: 手动再轮询一次也不再发请求
    let snapshot = monitor.poll_once(&mut handle).await.unwrap();
    assert!(snapshot.state.is_terminal());
    assert_eq!(transport.request_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_terminal_outcome_is_cached_without_new_http() {
    let (client, transport) = scripted_client();
    transport.push_response(200, &task_xml("42", "FINISHED_SUCCESSFULLY", &[]));

    let monitor = client.monitor();
    let mut handle = monitor.track(&accepted_for(TASK_HREF)).unwrap();

    let first = monitor
        .await_completion_with(&mut handle, Duration::from_millis(10), Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(first, TaskOutcome::Succeeded);
    assert_eq!(transport.request_count(), 1);

    // 第二次等待直接返回缓存的终局
    let second = monitor
        .await_completion_with(&mut handle, Duration::from_millis(10), Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(second, TaskOutcome::Succeeded);
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_is_local_policy_not_task_state() {
    let (client, transport) = scripted_client();
    // 服务端永远不给终态
    transport.push_response_times(200, &task_xml("42", "PENDING", &[]), 32);

    let monitor = client.monitor();
    let mut handle = monitor.track(&accepted_for(TASK_HREF)).unwrap();

    let started = tokio::time::Instant::now();
    let outcome = monitor
        .await_completion_with(
            &mut handle,
            Duration::from_millis(10),
            Duration::from_millis(50),
        )
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(outcome, TaskOutcome::TimedOut);
    // 虚拟时钟上的等待严格落在超时边界内
    assert!(elapsed <= Duration::from_millis(100), "等待了 {elapsed:?}");

    // 返回后不再发起任何轮询
    let polls = transport.request_count();
    assert!(polls <= 6, "轮询了 {polls} 次");
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(transport.request_count(), polls);

    // 超时不是终局, 句柄仍可继续轮询
    assert!(!handle.is_terminal());
}

#[tokio::test(start_paused = true)]
async fn test_vanished_task_is_distinct_from_not_found() {
    let (client, transport) = scripted_client();
    transport.push_response(200, &task_xml("42", "PENDING", &[]));
    transport.push_response(404, "");

    let monitor = client.monitor();
    let mut handle = monitor.track(&accepted_for(TASK_HREF)).unwrap();

    let snapshot = monitor.poll_once(&mut handle).await.unwrap();
    assert!(!snapshot.state.is_terminal());

    let err = monitor.poll_once(&mut handle).await.unwrap_err();
    assert!(
        matches!(err, AbiquoError::TaskVanished { ref href } if href == TASK_HREF),
        "expected TaskVanished, got {err:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn test_submitted_task_vanishing_on_first_poll() {
    let (client, transport) = scripted_client();
    transport.push_response(404, "");

    let monitor = client.monitor();
    let mut handle = monitor.track(&accepted_for(TASK_HREF)).unwrap();

    // SUBMITTED 状态下的 404 同样是任务蒸发, 不是普通的不存在
    let err = monitor.poll_once(&mut handle).await.unwrap_err();
    assert!(matches!(err, AbiquoError::TaskVanished { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_task_without_jobs_completes_on_own_state() {
    let (client, transport) = scripted_client();
    transport.push_response(200, &task_xml("42", "FINISHED_SUCCESSFULLY", &[]));

    let monitor = client.monitor();
    let mut handle = monitor.track(&accepted_for(TASK_HREF)).unwrap();

    let outcome = monitor
        .await_completion_with(&mut handle, Duration::from_millis(10), Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(outcome, TaskOutcome::Succeeded);
    let snapshot = handle.last_snapshot().unwrap();
    assert_eq!(snapshot.total_jobs(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_failed_task_reports_failing_job_description() {
    let (client, transport) = scripted_client();
    let body = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><task><taskId>42</taskId><ownerId>1</ownerId><type>DEPLOY</type><state>FAILED</state><timestamp>1</timestamp><jobs><job><id>42.schedule</id><state>FINISHED_SUCCESSFULLY</state><timestamp>1</timestamp></job><job><id>42.configure</id><description>Hypervisor unreachable</description><state>FAILED</state><timestamp>2</timestamp></job></jobs></task>"#;
    transport.push_response(200, body);

    let monitor = client.monitor();
    let mut handle = monitor.track(&accepted_for(TASK_HREF)).unwrap();

    let outcome = monitor
        .await_completion_with(&mut handle, Duration::from_millis(10), Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(outcome, TaskOutcome::Failed("Hypervisor unreachable".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_transport_error_during_polling_propagates() {
    let (client, transport) = scripted_client();
    transport.push_response(200, &task_xml("42", "PENDING", &[]));
    transport.push_failure("connection reset by peer");

    let monitor = client.monitor();
    let mut handle = monitor.track(&accepted_for(TASK_HREF)).unwrap();

    let err = monitor
        .await_completion_with(&mut handle, Duration::from_millis(10), Duration::from_secs(10))
        .await
        .unwrap_err();

    assert!(matches!(err, AbiquoError::Transport(_)));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_requires_server_advertised_action() {
    let (client, transport) = scripted_client();
    transport.push_response(200, &task_xml("42", "RUNNING", &[]));

    let monitor = client.monitor();
    let mut handle = monitor.track(&accepted_for(TASK_HREF)).unwrap();
    monitor.poll_once(&mut handle).await.unwrap();

    // 任务表示没有公布 cancel 动作: 不支持取消
    let err = monitor.cancel(&mut handle).await.unwrap_err();
    assert!(matches!(err, AbiquoError::Unsupported(_)));
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_posts_advertised_action_link() {
    let (client, transport) = scripted_client();
    let cancel_href = format!("{TASK_HREF}/action/cancel");
    transport.push_response(
        200,
        &task_xml_with_links("42", "RUNNING", &[("cancel", &cancel_href)], &[]),
    );
    transport.push_response_for("/action/cancel", 204, "");

    let monitor = client.monitor();
    let mut handle = monitor.track(&accepted_for(TASK_HREF)).unwrap();
    monitor.poll_once(&mut handle).await.unwrap();

    monitor.cancel(&mut handle).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method, "POST");
    assert!(requests[1].url.ends_with("/action/cancel"));

    // 取消只是请求, 本地视图等下一次轮询才更新
    assert!(!handle.is_terminal());
}

#[tokio::test(start_paused = true)]
async fn test_await_completion_uses_configured_interval() {
    let (client, transport) = scripted_client();
    transport.push_response(200, &task_xml("42", "PENDING", &[]));
    transport.push_response(200, &task_xml("42", "FINISHED_SUCCESSFULLY", &[]));

    let monitor = client.monitor();
    let mut handle = monitor.track(&accepted_for(TASK_HREF)).unwrap();

    let started = tokio::time::Instant::now();
    let outcome = monitor
        .await_completion(&mut handle, Duration::from_secs(60))
        .await
        .unwrap();

    assert_eq!(outcome, TaskOutcome::Succeeded);
    // 默认轮询间隔 5s: 两次轮询之间恰好隔一个间隔
    assert_eq!(started.elapsed(), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_accepted_xml_round_trip_through_tracking() {
    let (client, _transport) = scripted_client();

    let body = accepted_xml(TASK_HREF);
    let accepted: AcceptedRequestDto = abiquo_model::xml::parse(&body).unwrap();
    let handle = client.monitor().track(&accepted).unwrap();

    assert_eq!(handle.task_href(), TASK_HREF);
}
