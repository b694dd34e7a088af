use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::Receiver;
use tokio::sync::Mutex;

use crate::api::dto::{PaymentMethodDto, QrCodeDto};
use crate::api::event::dto::BackendEventDto;
use crate::error::AppError;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::BadgeSetModel;

// the engine never owns the notification / chat lists, the embedding
// surface refetches them on demand and reports how many entries its
// unread predicate selects
#[async_trait]
pub trait AbstractUnreadSource: Send + Sync {
    async fn num_unread_notifications(&self) -> Result<u32, AppError>;
    async fn num_unread_messages(&self) -> Result<u32, AppError>;
}

/// Applies server-push events to session state. Activity / notification /
/// chat events trigger a refetch-count through [AbstractUnreadSource] and
/// settle the matching badge with `recompute_from_unread`; when the
/// refetch fails the badge is bumped incrementally so the indicator still
/// shows. QR events keep the payment QR availability map current without
/// a poll.
pub struct AppEventDispatcher {
    badges: Arc<Mutex<BadgeSetModel>>,
    qr_codes: Arc<Mutex<HashMap<PaymentMethodDto, QrCodeDto>>>,
    unread_src: Arc<Box<dyn AbstractUnreadSource>>,
    shutdown: Arc<AtomicBool>,
    logctx: Arc<AppLogContext>,
}

impl AppEventDispatcher {
    pub fn new(
        badges: Arc<Mutex<BadgeSetModel>>,
        qr_codes: Arc<Mutex<HashMap<PaymentMethodDto, QrCodeDto>>>,
        unread_src: Arc<Box<dyn AbstractUnreadSource>>,
        shutdown: Arc<AtomicBool>,
        logctx: Arc<AppLogContext>,
    ) -> Self {
        Self {
            badges,
            qr_codes,
            unread_src,
            shutdown,
            logctx,
        }
    }

    // runs until the stream closes or shutdown is flagged
    pub async fn run(&self, mut receiver: Receiver<BackendEventDto>) {
        let logctx_p = &self.logctx;
        while let Some(evt) = receiver.recv().await {
            if self.shutdown.load(Ordering::Relaxed) {
                app_log_event!(logctx_p, AppLogLevel::INFO, "dispatcher shut down");
                break;
            }
            self.apply(evt).await;
        }
    }

    pub async fn apply(&self, evt: BackendEventDto) {
        let logctx_p = &self.logctx;
        match evt {
            BackendEventDto::NewActivity | BackendEventDto::UserNotification => {
                let refetched = self.unread_src.num_unread_notifications().await;
                let mut guard = self.badges.lock().await;
                match refetched {
                    Ok(n) => guard.notifications.recompute_from_unread(n),
                    Err(e) => {
                        app_log_event!(
                            logctx_p,
                            AppLogLevel::WARNING,
                            "notification refetch failed, error:{e}"
                        );
                        guard.notifications.notify_increment();
                    }
                }
            }
            BackendEventDto::NewChatInbox => {
                let refetched = self.unread_src.num_unread_messages().await;
                let mut guard = self.badges.lock().await;
                match refetched {
                    Ok(n) => guard.messages.recompute_from_unread(n),
                    Err(e) => {
                        app_log_event!(
                            logctx_p,
                            AppLogLevel::WARNING,
                            "chat refetch failed, error:{e}"
                        );
                        guard.messages.notify_increment();
                    }
                }
            }
            BackendEventDto::QrCodeUpdate(d) => {
                app_log_event!(
                    logctx_p,
                    AppLogLevel::DEBUG,
                    "qr-update, method:{:?}, available:{}",
                    d.payment_method,
                    d.available
                );
                let mut guard = self.qr_codes.lock().await;
                let _discard = guard.insert(d.payment_method, d);
            }
            BackendEventDto::QrCodeDelete { payment_method } => {
                let mut guard = self.qr_codes.lock().await;
                let _discard = guard.remove(&payment_method);
            }
        }
    } // end of fn apply
} // end of impl AppEventDispatcher
