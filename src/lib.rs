use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio::sync::Mutex;

pub mod adapter;
pub mod api;
pub mod constant;
pub mod error;
pub mod logging;
pub mod model;
pub mod sync;
pub mod usecase;

mod config;
pub use config::{
    AppBackendCfg, AppBasepathCfg, AppCartSyncCfg, AppConfig, AppEngineCfg, AppLogHandlerCfg,
    AppLoggerCfg, AppLoggingCfg,
};

use adapter::AbstractBackendClient;
use api::dto::{PaymentMethodDto, QrCodeDto};
use model::{BadgeSetModel, CartModel, ProductCatalogModel};
use sync::CartSyncWorker;

pub(crate) type AppLogAlias = Arc<String>;

// session-scoped state shared by every surface of the storefront UI,
// the explicit replacement for ambient context providers
pub struct AppSharedState {
    _cfg: Arc<AppConfig>,
    _log: Arc<logging::AppLogContext>,
    _client: Arc<Box<dyn AbstractBackendClient>>,
    _cart: Arc<Mutex<CartModel>>,
    _catalog: Arc<Mutex<ProductCatalogModel>>,
    _badges: Arc<Mutex<BadgeSetModel>>,
    _qr_codes: Arc<Mutex<HashMap<PaymentMethodDto, QrCodeDto>>>,
    _sync_worker: Arc<CartSyncWorker>,
    _shutdown: Arc<AtomicBool>,
}

impl AppSharedState {
    pub fn new(
        cfg: AppConfig,
        log: logging::AppLogContext,
        client: Box<dyn AbstractBackendClient>,
        owner: u32,
    ) -> Self {
        let log = Arc::new(log);
        let client = Arc::new(client);
        let sync_worker = CartSyncWorker::new(
            cfg.engine.cart_sync.clone(),
            client.clone(),
            log.clone(),
        );
        Self {
            _cfg: Arc::new(cfg),
            _log: log,
            _client: client,
            _cart: Arc::new(Mutex::new(CartModel::new(owner))),
            _catalog: Arc::new(Mutex::new(ProductCatalogModel::new())),
            _badges: Arc::new(Mutex::new(BadgeSetModel::default())),
            _qr_codes: Arc::new(Mutex::new(HashMap::new())),
            _sync_worker: Arc::new(sync_worker),
            _shutdown: Arc::new(AtomicBool::new(false)),
        }
    } // end of fn new

    pub fn config(&self) -> &Arc<AppConfig> {
        &self._cfg
    }
    pub fn log_context(&self) -> &Arc<logging::AppLogContext> {
        &self._log
    }
    pub fn backend_client(&self) -> Arc<Box<dyn AbstractBackendClient>> {
        self._client.clone()
    }
    pub fn cart(&self) -> Arc<Mutex<CartModel>> {
        self._cart.clone()
    }
    pub fn catalog(&self) -> Arc<Mutex<ProductCatalogModel>> {
        self._catalog.clone()
    }
    pub fn badges(&self) -> Arc<Mutex<BadgeSetModel>> {
        self._badges.clone()
    }
    pub fn qr_codes(&self) -> Arc<Mutex<HashMap<PaymentMethodDto, QrCodeDto>>> {
        self._qr_codes.clone()
    }
    pub fn sync_worker(&self) -> Arc<CartSyncWorker> {
        self._sync_worker.clone()
    }
    pub fn shutdown(&self) -> Arc<AtomicBool> {
        self._shutdown.clone()
    }
} // end of impl AppSharedState

impl Clone for AppSharedState {
    fn clone(&self) -> Self {
        Self {
            _cfg: self._cfg.clone(),
            _log: self._log.clone(),
            _client: self._client.clone(),
            _cart: self._cart.clone(),
            _catalog: self._catalog.clone(),
            _badges: self._badges.clone(),
            _qr_codes: self._qr_codes.clone(),
            _sync_worker: self._sync_worker.clone(),
            _shutdown: self._shutdown.clone(),
        }
    }
}
