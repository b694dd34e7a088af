use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::sync::Mutex;

use shopfront::adapter::{AbstractUnreadSource, AppEventDispatcher};
use shopfront::api::dto::{PaymentMethodDto, QrCodeDto};
use shopfront::api::event::dto::BackendEventDto;
use shopfront::error::{AppError, AppErrorCode};
use shopfront::model::BadgeSetModel;

use crate::ut_setup_log_context;

#[derive(Default)]
struct ScriptedCounts {
    notifications: u32,
    messages: u32,
    fails: bool,
}

// clones share the scripted counts, the test keeps one handle to
// reprogram them between events
#[derive(Clone, Default)]
struct ScriptedUnreadSource {
    inner: Arc<StdMutex<ScriptedCounts>>,
}

impl ScriptedUnreadSource {
    fn script(&self, notifications: u32, messages: u32) {
        let mut guard = self.inner.lock().unwrap();
        guard.notifications = notifications;
        guard.messages = messages;
    }
    fn script_failure(&self, flag: bool) {
        self.inner.lock().unwrap().fails = flag;
    }
}

#[async_trait]
impl AbstractUnreadSource for ScriptedUnreadSource {
    async fn num_unread_notifications(&self) -> Result<u32, AppError> {
        let guard = self.inner.lock().unwrap();
        if guard.fails {
            Err(AppError {
                code: AppErrorCode::RemoteUnavail,
                detail: Some("scripted-refetch-failure".to_string()),
            })
        } else {
            Ok(guard.notifications)
        }
    }
    async fn num_unread_messages(&self) -> Result<u32, AppError> {
        let guard = self.inner.lock().unwrap();
        if guard.fails {
            Err(AppError {
                code: AppErrorCode::RemoteUnavail,
                detail: Some("scripted-refetch-failure".to_string()),
            })
        } else {
            Ok(guard.messages)
        }
    }
} // end of impl AbstractUnreadSource for ScriptedUnreadSource

fn ut_setup_dispatcher() -> (
    AppEventDispatcher,
    ScriptedUnreadSource,
    Arc<Mutex<BadgeSetModel>>,
    Arc<Mutex<HashMap<PaymentMethodDto, QrCodeDto>>>,
    Arc<AtomicBool>,
) {
    let badges = Arc::new(Mutex::new(BadgeSetModel::default()));
    let qr_codes = Arc::new(Mutex::new(HashMap::new()));
    let shutdown = Arc::new(AtomicBool::new(false));
    let source = ScriptedUnreadSource::default();
    let source_handle: Arc<Box<dyn AbstractUnreadSource>> = Arc::new(Box::new(source.clone()));
    let dispatcher = AppEventDispatcher::new(
        badges.clone(),
        qr_codes.clone(),
        source_handle,
        shutdown.clone(),
        ut_setup_log_context(),
    );
    (dispatcher, source, badges, qr_codes, shutdown)
}

#[tokio::test]
async fn activity_event_recomputes_from_refetched_count() {
    let (dispatcher, source, badges, _qr, _shutdown) = ut_setup_dispatcher();
    source.script(4, 2);
    dispatcher.apply(BackendEventDto::NewActivity).await;
    dispatcher.apply(BackendEventDto::NewChatInbox).await;
    let guard = badges.lock().await;
    // badge counts settle to the unread-predicate result, not +1 per event
    assert_eq!(guard.notifications.count, 4);
    assert!(guard.notifications.visible);
    assert_eq!(guard.messages.count, 2);
    assert!(guard.messages.visible);
    assert_eq!(guard.cart.count, 0);
}

#[tokio::test]
async fn zero_unread_hides_the_badge() {
    let (dispatcher, source, badges, _qr, _shutdown) = ut_setup_dispatcher();
    source.script(4, 0);
    dispatcher.apply(BackendEventDto::UserNotification).await;
    // the next refetch reports everything read
    source.script(0, 0);
    dispatcher.apply(BackendEventDto::UserNotification).await;
    dispatcher.apply(BackendEventDto::NewChatInbox).await;
    let guard = badges.lock().await;
    assert_eq!(guard.notifications.count, 0);
    assert!(!guard.notifications.visible);
    assert_eq!(guard.messages.count, 0);
    assert!(!guard.messages.visible);
}

#[tokio::test]
async fn refetch_failure_falls_back_to_increment() {
    let (dispatcher, source, badges, _qr, _shutdown) = ut_setup_dispatcher();
    source.script_failure(true);
    dispatcher.apply(BackendEventDto::NewActivity).await;
    dispatcher.apply(BackendEventDto::NewActivity).await;
    {
        let guard = badges.lock().await;
        assert_eq!(guard.notifications.count, 2);
        assert!(guard.notifications.visible);
    }
    // a later successful refetch settles the drifted count
    source.script_failure(false);
    source.script(5, 0);
    dispatcher.apply(BackendEventDto::NewActivity).await;
    let guard = badges.lock().await;
    assert_eq!(guard.notifications.count, 5);
}

#[tokio::test]
async fn qr_events_maintain_availability_map() {
    let (dispatcher, _source, _badges, qr_codes, _shutdown) = ut_setup_dispatcher();
    let evt = BackendEventDto::QrCodeUpdate(QrCodeDto {
        payment_method: PaymentMethodDto::GCash,
        image: "qr-gcash.png".to_string(),
        available: true,
    });
    dispatcher.apply(evt).await;
    {
        let guard = qr_codes.lock().await;
        assert!(guard.get(&PaymentMethodDto::GCash).unwrap().available);
    }
    let evt = BackendEventDto::QrCodeUpdate(QrCodeDto {
        payment_method: PaymentMethodDto::GCash,
        image: "qr-gcash.png".to_string(),
        available: false,
    });
    dispatcher.apply(evt).await;
    {
        let guard = qr_codes.lock().await;
        assert!(!guard.get(&PaymentMethodDto::GCash).unwrap().available);
    }
    let evt = BackendEventDto::QrCodeDelete {
        payment_method: PaymentMethodDto::GCash,
    };
    dispatcher.apply(evt).await;
    let guard = qr_codes.lock().await;
    assert!(guard.is_empty());
}

#[tokio::test]
async fn run_drains_stream_until_closed() {
    let (dispatcher, source, badges, _qr, _shutdown) = ut_setup_dispatcher();
    source.script(1, 3);
    let (sender, receiver) = mpsc::channel(8);
    sender.send(BackendEventDto::NewActivity).await.unwrap();
    sender.send(BackendEventDto::NewChatInbox).await.unwrap();
    drop(sender); // closing the stream ends the loop
    dispatcher.run(receiver).await;
    let guard = badges.lock().await;
    assert_eq!(guard.notifications.count, 1);
    assert_eq!(guard.messages.count, 3);
}

#[tokio::test]
async fn shutdown_flag_stops_dispatch() {
    let (dispatcher, source, badges, _qr, shutdown) = ut_setup_dispatcher();
    source.script(1, 0);
    let (sender, receiver) = mpsc::channel(8);
    sender.send(BackendEventDto::NewActivity).await.unwrap();
    sender.send(BackendEventDto::NewActivity).await.unwrap();
    shutdown.store(true, Ordering::Relaxed);
    drop(sender);
    dispatcher.run(receiver).await;
    let guard = badges.lock().await;
    assert_eq!(guard.notifications.count, 0);
}
