use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::adapter::AbstractBackendClient;
use crate::api::dto::{CartLineSyncDto, CartSyncReqDto};
use crate::config::AppCartSyncCfg;
use crate::constant::hard_limit;
use crate::error::{AppError, AppErrorCode};
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};

// append-only between flushes, drained as one batch
struct CartSyncQueue {
    items: Vec<CartLineSyncDto>,
}

/// Coalesces rapid successive add-to-cart actions into a single batched
/// backend write. Every push restarts the quiet-period timer; the queue
/// is flushed only once no further push arrived within the period.
///
/// A failed flush retains the batch and retries with capped exponential
/// backoff; the batch is dropped only after the configured attempt limit.
pub struct CartSyncWorker {
    queue: Mutex<CartSyncQueue>,
    // bumped on every push, a timer fires only if it still owns the
    // latest generation when it wakes up
    generation: AtomicU64,
    cfg: AppCartSyncCfg,
    client: Arc<Box<dyn AbstractBackendClient>>,
    logctx: Arc<AppLogContext>,
}

impl CartSyncWorker {
    pub fn new(
        cfg: AppCartSyncCfg,
        client: Arc<Box<dyn AbstractBackendClient>>,
        logctx: Arc<AppLogContext>,
    ) -> Self {
        Self {
            queue: Mutex::new(CartSyncQueue { items: Vec::new() }),
            generation: AtomicU64::new(0),
            cfg,
            client,
            logctx,
        }
    }

    pub async fn num_pending(&self) -> usize {
        let guard = self.queue.lock().await;
        guard.items.len()
    }

    pub async fn enqueue(self: &Arc<Self>, item: CartLineSyncDto) -> Result<(), AppError> {
        {
            let mut guard = self.queue.lock().await;
            if guard.items.len() >= hard_limit::MAX_PENDING_SYNC_ITEMS {
                return Err(AppError {
                    code: AppErrorCode::ExceedingMaxLimit,
                    detail: Some(format!(
                        "pending-sync-items:{}",
                        hard_limit::MAX_PENDING_SYNC_ITEMS
                    )),
                });
            }
            guard.items.push(item);
        }
        let my_gen = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let me = self.clone();
        let quiet_period = Duration::from_millis(self.cfg.debounce_millisecs as u64);
        let _handle = tokio::task::spawn(async move {
            sleep(quiet_period).await;
            if me.generation.load(Ordering::SeqCst) == my_gen {
                me.flush_with_retry().await;
            } // superseded timers simply give up, classic debounce
        });
        Ok(())
    } // end of fn enqueue

    // immediate drain, for session teardown so queued additions are not
    // silently lost with a still-armed timer
    pub async fn flush_now(self: &Arc<Self>) {
        let _discard = self.generation.fetch_add(1, Ordering::SeqCst);
        self.flush_with_retry().await;
    }

    async fn flush_with_retry(&self) {
        let batch = {
            let mut guard = self.queue.lock().await;
            std::mem::take(&mut guard.items)
        };
        if batch.is_empty() {
            return;
        }
        let num_items = batch.len();
        let logctx_p = &self.logctx;
        let mut attempt = 0u8;
        loop {
            let req = CartSyncReqDto {
                items: batch.clone(),
            };
            match self.client.add_cart_lines(req).await {
                Ok(_v) => {
                    app_log_event!(
                        logctx_p,
                        AppLogLevel::DEBUG,
                        "flushed, num-items:{num_items}, attempt:{attempt}"
                    );
                    break;
                }
                Err(e) => {
                    attempt += 1;
                    if attempt >= self.cfg.max_flush_attempts {
                        app_log_event!(
                            logctx_p,
                            AppLogLevel::ERROR,
                            "batch dropped, num-items:{num_items}, attempts:{attempt}, last-error:{e}"
                        );
                        break;
                    }
                    let exp = u32::from(attempt.min(10) - 1);
                    let wait_ms = (self.cfg.backoff_base_millisecs as u64) << exp;
                    app_log_event!(
                        logctx_p,
                        AppLogLevel::WARNING,
                        "flush failed, attempt:{attempt}, retry-after-ms:{wait_ms}, error:{e}"
                    );
                    sleep(Duration::from_millis(wait_ms)).await;
                }
            }
        } // end of retry loop
    } // end of fn flush_with_retry
} // end of impl CartSyncWorker
