use std::sync::Arc;

use tokio::sync::Mutex;

use crate::adapter::AbstractBackendClient;
use crate::api::dto::{CheckoutBlockReason, OrderPlacedRespDto};
use crate::error::AppError;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::{BadgeSetModel, CartModel, CheckoutModel, CheckoutOrigin};

pub struct PlaceOrderUseCase {
    pub client: Arc<Box<dyn AbstractBackendClient>>,
    pub cart: Arc<Mutex<CartModel>>,
    pub badges: Arc<Mutex<BadgeSetModel>>,
    pub log_ctx: Arc<AppLogContext>,
}

pub enum PlaceOrderUsKsResult {
    Success(OrderPlacedRespDto),
    // submission gate rejected, the form stays populated for retry
    ValidationFailure(Vec<CheckoutBlockReason>),
    ServerError(AppError),
}

impl PlaceOrderUseCase {
    pub async fn execute(self, checkout: CheckoutModel) -> PlaceOrderUsKsResult {
        let origin = checkout.origin.clone();
        let (req, proof) = match checkout.to_request() {
            Ok(v) => v,
            Err(blockers) => return PlaceOrderUsKsResult::ValidationFailure(blockers),
        };
        let logctx = &self.log_ctx;
        let resp = match self.client.submit_checkout(req, proof).await {
            Ok(v) => v,
            Err(e) => {
                app_log_event!(logctx, AppLogLevel::WARNING, "order rejected, error:{e}");
                return PlaceOrderUsKsResult::ServerError(e);
            }
        };
        if matches!(origin, CheckoutOrigin::FromCart) {
            self.clear_cart_optimistic(resp.order_id.as_str()).await;
        } // a buy-now order leaves the session cart untouched
        PlaceOrderUsKsResult::Success(resp)
    } // end of fn execute

    // the local cart is cleared before the server confirms its own
    // clear; only a failure of that specific call rolls it back
    async fn clear_cart_optimistic(&self, order_id: &str) {
        let snapshot = {
            let mut cart = self.cart.lock().await;
            cart.clear()
        };
        let num_units = {
            let mut badges = self.badges.lock().await;
            let prev = badges.cart.count;
            badges.cart.reset();
            prev
        };
        let logctx = &self.log_ctx;
        if let Err(e) = self.client.clear_cart().await {
            app_log_event!(
                logctx,
                AppLogLevel::WARNING,
                "order:{order_id}, cart-clear rolled back, error:{e}"
            );
            let mut cart = self.cart.lock().await;
            cart.restore(snapshot);
            let mut badges = self.badges.lock().await;
            badges.cart.count = num_units;
            badges.cart.visible = true;
        } else {
            app_log_event!(
                logctx,
                AppLogLevel::DEBUG,
                "order:{order_id}, num-lines-cleared:{}",
                snapshot.num_lines()
            );
        }
    } // end of fn clear_cart_optimistic
} // end of impl PlaceOrderUseCase
