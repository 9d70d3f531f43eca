use super::*;
use crate::queue::work_queue;
use crate::test_support::{api_url, MockRepositoryClient};
use std::time::Duration;

fn queued(position: usize, name: &str) -> QueuedTarget {
    QueuedTarget {
        position,
        target: DeleteTarget::new(api_url(name)),
    }
}

#[tokio::test]
async fn test_collector_sorts_by_position() {
    let collector = ResultCollector::new();
    collector
        .record_planned(2, DeleteTarget::new(api_url("r6")))
        .await;
    collector
        .record_planned(0, DeleteTarget::new(api_url("r2")))
        .await;
    collector
        .record_planned(1, DeleteTarget::new(api_url("r4")))
        .await;

    let report = collector.into_report(RunMode::DryRun).await;

    assert_eq!(
        report.api_urls(),
        vec![api_url("r2"), api_url("r4"), api_url("r6")]
    );
}

#[tokio::test]
async fn test_dry_run_workers_never_delete() {
    let client = Arc::new(MockRepositoryClient::new());
    let collector = Arc::new(ResultCollector::new());
    let (sender, receiver) = work_queue(4);

    let pool = WorkerPool::spawn(
        3,
        receiver,
        client.clone(),
        RunMode::DryRun,
        collector.clone(),
    );

    for (position, name) in ["r2", "r4", "r6"].iter().enumerate() {
        sender.push(queued(position, name)).await.unwrap();
    }
    sender.close();

    let handled = pool.join().await.expect("workers should finish");

    assert_eq!(handled, 3);
    assert_eq!(client.delete_calls(), 0);
    assert_eq!(collector.into_report(RunMode::DryRun).await.len(), 3);
}

#[tokio::test]
async fn test_execute_records_failures_and_keeps_going() {
    let client = Arc::new(MockRepositoryClient::new().with_delete_failure("r4", 403));
    let collector = Arc::new(ResultCollector::new());
    let (sender, receiver) = work_queue(4);

    let pool = WorkerPool::spawn(
        1,
        receiver,
        client.clone(),
        RunMode::Execute,
        collector.clone(),
    );

    for (position, name) in ["r2", "r4", "r6"].iter().enumerate() {
        sender.push(queued(position, name)).await.unwrap();
    }
    sender.close();

    pool.join().await.expect("workers should finish");

    let report = collector.into_report(RunMode::Execute).await;
    let RunReport::Deleted(outcomes) = report else {
        panic!("Expected an execute report");
    };

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].succeeded);
    assert!(!outcomes[1].succeeded);
    assert!(outcomes[1]
        .error_detail
        .as_deref()
        .unwrap()
        .contains("403"));
    assert!(outcomes[2].succeeded);
    assert_eq!(client.deleted(), vec![api_url("r2"), api_url("r6")]);
}

#[tokio::test]
async fn test_workers_stop_when_queue_closes_empty() {
    let client = Arc::new(MockRepositoryClient::new());
    let collector = Arc::new(ResultCollector::new());
    let (sender, receiver) = work_queue::<QueuedTarget>(4);

    let pool = WorkerPool::spawn(5, receiver, client, RunMode::Execute, collector.clone());
    sender.close();

    let handled = tokio::time::timeout(Duration::from_secs(5), pool.join())
        .await
        .expect("workers should stop on the end-of-stream sentinel")
        .expect("workers should finish");

    assert_eq!(handled, 0);
    assert!(collector.into_report(RunMode::Execute).await.is_empty());
}

#[tokio::test]
async fn test_in_flight_deletes_bounded_by_worker_count() {
    let client = Arc::new(
        MockRepositoryClient::new().with_delete_delay(Duration::from_millis(20)),
    );
    let collector = Arc::new(ResultCollector::new());
    let (sender, receiver) = work_queue(16);

    let pool = WorkerPool::spawn(
        2,
        receiver,
        client.clone(),
        RunMode::Execute,
        collector,
    );

    for position in 0..10 {
        sender
            .push(queued(position, &format!("fork{position}")))
            .await
            .unwrap();
    }
    sender.close();

    pool.join().await.expect("workers should finish");

    assert_eq!(client.delete_calls(), 10);
    assert!(client.max_in_flight() <= 2);
}
