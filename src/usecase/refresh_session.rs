use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::adapter::AbstractBackendClient;
use crate::api::dto::{BillingAddressDto, PaymentMethodDto, QrCodeDto};
use crate::error::AppError;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::{BadgeSetModel, CartModel};

pub struct RefreshSessionUseCase {
    pub client: Arc<Box<dyn AbstractBackendClient>>,
    pub cart: Arc<Mutex<CartModel>>,
    pub badges: Arc<Mutex<BadgeSetModel>>,
    pub qr_codes: Arc<Mutex<HashMap<PaymentMethodDto, QrCodeDto>>>,
    pub log_ctx: Arc<AppLogContext>,
}

pub enum RefreshSessionUsKsResult {
    // saved billing address for checkout prefill, if the account has one
    Success(Option<BillingAddressDto>),
    ServerError(AppError),
}

impl RefreshSessionUseCase {
    // authoritative state overwrites whatever optimistic deltas the
    // previous page still had, matching a fresh page load
    pub async fn execute(self) -> RefreshSessionUsKsResult {
        let snapshot = match self.client.fetch_cart().await {
            Ok(v) => v,
            Err(e) => return RefreshSessionUsKsResult::ServerError(e),
        };
        let num_units = snapshot
            .lines
            .iter()
            .map(|ln| ln.quantity)
            .sum::<u32>();
        {
            let mut cart = self.cart.lock().await;
            cart.replace_from(snapshot);
        }
        {
            let mut badges = self.badges.lock().await;
            badges.cart.overwrite(num_units);
        }
        let qr_fetched = match self.client.fetch_qr_codes().await {
            Ok(v) => v,
            Err(e) => return RefreshSessionUsKsResult::ServerError(e),
        };
        {
            let mut guard = self.qr_codes.lock().await;
            *guard = qr_fetched
                .into_iter()
                .map(|d| (d.payment_method, d))
                .collect();
        }
        let billing = match self.client.fetch_billing_address().await {
            Ok(v) => v,
            Err(e) => return RefreshSessionUsKsResult::ServerError(e),
        };
        let logctx = &self.log_ctx;
        app_log_event!(
            logctx,
            AppLogLevel::DEBUG,
            "num-units:{num_units}, billing-saved:{}",
            billing.is_some()
        );
        RefreshSessionUsKsResult::Success(billing)
    } // end of fn execute
} // end of impl RefreshSessionUseCase
