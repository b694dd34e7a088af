use std::sync::Arc;

use tokio::sync::Mutex;

use crate::api::dto::CartLineSyncDto;
use crate::constant::hard_limit;
use crate::error::{AppError, AppErrorCode};
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::{BadgeSetModel, CartModel, ProductCatalogModel, StockProjection};
use crate::sync::CartSyncWorker;

pub struct AddCartItemUseCase {
    pub cart: Arc<Mutex<CartModel>>,
    pub catalog: Arc<Mutex<ProductCatalogModel>>,
    pub badges: Arc<Mutex<BadgeSetModel>>,
    pub sync_worker: Arc<CartSyncWorker>,
    pub log_ctx: Arc<AppLogContext>,
}

pub enum AddCartItemUsKsResult {
    // the projected availability after the optimistic decrement, so the
    // calling surface can disable its add control
    Success(StockProjection),
    ProductNotFound,
    // a brand-new line would exceed the distinct-line cap; merging into
    // an existing line is still allowed
    CartFull,
    QueueFull,
    ServerError(AppError),
}

impl AddCartItemUseCase {
    pub async fn execute(self, product_id: u64) -> AddCartItemUsKsResult {
        {
            let cart = self.cart.lock().await;
            let would_append = !cart.lines().iter().any(|ln| ln.product_id == product_id);
            if would_append && cart.num_lines() >= hard_limit::MAX_CART_LINES {
                return AddCartItemUsKsResult::CartFull;
            }
        }
        let (pending, projection) = {
            let mut catalog = self.catalog.lock().await;
            let entry = match catalog.get(product_id) {
                Some(e) => e,
                None => return AddCartItemUsKsResult::ProductNotFound,
            };
            let pending = CartLineSyncDto {
                product_id: entry.id_,
                seller_id: entry.seller_id,
                name: entry.name.clone(),
                description: entry.description.clone(),
                price: entry.price,
                image: entry.image.clone(),
            };
            let projection = match catalog.project_stock_decrement(product_id) {
                Ok(p) => p,
                Err(e) => return AddCartItemUsKsResult::ServerError(e),
            };
            (pending, projection)
        };
        {
            // cart mutation and badge bump happen synchronously, the
            // caller sees the new state before any network traffic
            let mut cart = self.cart.lock().await;
            cart.add_item(&pending);
        }
        {
            let mut badges = self.badges.lock().await;
            badges.cart.notify_increment();
        }
        let logctx = &self.log_ctx;
        if let Err(e) = self.sync_worker.enqueue(pending).await {
            app_log_event!(
                logctx,
                AppLogLevel::WARNING,
                "enqueue failed, product:{product_id}, error:{e}"
            );
            return match &e.code {
                AppErrorCode::ExceedingMaxLimit => AddCartItemUsKsResult::QueueFull,
                _others => AddCartItemUsKsResult::ServerError(e),
            };
        }
        app_log_event!(
            logctx,
            AppLogLevel::DEBUG,
            "product:{product_id}, projection:{:?}",
            projection
        );
        AddCartItemUsKsResult::Success(projection)
    } // end of fn execute
} // end of impl AddCartItemUseCase
