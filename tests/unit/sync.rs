use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use shopfront::adapter::{app_backend::MockBackendClient, AbstractBackendClient};
use shopfront::sync::CartSyncWorker;

use crate::model::ut_setup_sync_items;
use crate::{ut_setup_log_context, ut_setup_sync_cfg};

fn ut_setup_worker(
    debounce_millisecs: u32,
    max_flush_attempts: u8,
    backoff_base_millisecs: u32,
) -> (Arc<CartSyncWorker>, MockBackendClient) {
    let mock = MockBackendClient::build();
    let client: Arc<Box<dyn AbstractBackendClient>> = Arc::new(Box::new(mock.clone()));
    let cfg = ut_setup_sync_cfg(debounce_millisecs, max_flush_attempts, backoff_base_millisecs);
    let worker = Arc::new(CartSyncWorker::new(cfg, client, ut_setup_log_context()));
    (worker, mock)
}

#[tokio::test(start_paused = true)]
async fn rapid_pushes_coalesce_into_one_batch() {
    let (worker, mock) = ut_setup_worker(1000, 3, 50);
    let mut items = ut_setup_sync_items(vec![
        (140, 21, "ampalaya", 9500),
        (141, 21, "sitaw", 4000),
        (140, 21, "ampalaya", 9500),
    ]);
    // pushes at t = 0, 400, 800 keep restarting the quiet period
    worker.enqueue(items.remove(0)).await.unwrap();
    sleep(Duration::from_millis(400)).await;
    worker.enqueue(items.remove(0)).await.unwrap();
    sleep(Duration::from_millis(400)).await;
    worker.enqueue(items.remove(0)).await.unwrap();
    sleep(Duration::from_millis(900)).await;
    // t = 1700, last quiet period ends at t = 1800
    assert!(mock.flushed_batches().is_empty());
    assert_eq!(worker.num_pending().await, 3);
    sleep(Duration::from_millis(200)).await;
    let batches = mock.flushed_batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 3);
    assert_eq!(batches[0][0].product_id, 140);
    assert_eq!(batches[0][1].product_id, 141);
    assert_eq!(worker.num_pending().await, 0);
} // end of fn rapid_pushes_coalesce_into_one_batch

#[tokio::test(start_paused = true)]
async fn separated_pushes_flush_separately() {
    let (worker, mock) = ut_setup_worker(1000, 3, 50);
    let mut items = ut_setup_sync_items(vec![(140, 21, "ampalaya", 9500), (141, 21, "sitaw", 4000)]);
    worker.enqueue(items.remove(0)).await.unwrap();
    sleep(Duration::from_millis(1100)).await;
    assert_eq!(mock.flushed_batches().len(), 1);
    worker.enqueue(items.remove(0)).await.unwrap();
    sleep(Duration::from_millis(1100)).await;
    let batches = mock.flushed_batches();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[1].len(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_flush_retried_with_backoff() {
    let (worker, mock) = ut_setup_worker(100, 4, 50);
    mock.script_sync_failures(2);
    let mut items = ut_setup_sync_items(vec![(140, 21, "ampalaya", 9500)]);
    worker.enqueue(items.remove(0)).await.unwrap();
    // attempts at t = 100 and t = 150 fail, t = 250 succeeds
    sleep(Duration::from_millis(180)).await;
    assert!(mock.flushed_batches().is_empty());
    sleep(Duration::from_millis(120)).await;
    let batches = mock.flushed_batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 1);
}

#[tokio::test(start_paused = true)]
async fn batch_dropped_after_attempt_limit() {
    let (worker, mock) = ut_setup_worker(100, 3, 50);
    mock.script_sync_failures(10);
    let mut items = ut_setup_sync_items(vec![(140, 21, "ampalaya", 9500)]);
    worker.enqueue(items.remove(0)).await.unwrap();
    // failures at t = 100, 150, 250, then the batch is given up on
    sleep(Duration::from_millis(1000)).await;
    assert!(mock.flushed_batches().is_empty());
    assert_eq!(worker.num_pending().await, 0);
}

#[tokio::test(start_paused = true)]
async fn flush_now_drains_without_waiting() {
    let (worker, mock) = ut_setup_worker(30_000, 3, 50);
    let mut items = ut_setup_sync_items(vec![(140, 21, "ampalaya", 9500), (141, 21, "sitaw", 4000)]);
    worker.enqueue(items.remove(0)).await.unwrap();
    worker.enqueue(items.remove(0)).await.unwrap();
    worker.flush_now().await;
    let batches = mock.flushed_batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 2);
    // the superseded timer must not produce a second empty flush
    sleep(Duration::from_millis(31_000)).await;
    assert_eq!(mock.flushed_batches().len(), 1);
}
