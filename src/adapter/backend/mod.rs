mod base_client;
mod mock;
mod rest;

use std::marker::{Send, Sync};
use std::result::Result;
use std::sync::Arc;

use async_trait::async_trait;

use crate::api::dto::{
    BillingAddressDto, CartDto, CartSyncReqDto, CheckoutReqDto, OrderPlacedRespDto, QrCodeDto,
};
use crate::config::AppBackendCfg;
use crate::error::AppError;
use crate::logging::AppLogContext;
use crate::model::ProofOfPaymentModel;

// every network call the engine performs goes through this seam,
// unit tests swap in the mock implementation
#[async_trait]
pub trait AbstractBackendClient: Send + Sync {
    // batched cart-line upsert flushed by the sync worker
    async fn add_cart_lines(&self, req: CartSyncReqDto) -> Result<(), AppError>;
    // authoritative cart snapshot on session load
    async fn fetch_cart(&self) -> Result<CartDto, AppError>;
    // order submission, multipart with an optional proof-of-payment part
    async fn submit_checkout(
        &self,
        req: CheckoutReqDto,
        proof: Option<ProofOfPaymentModel>,
    ) -> Result<OrderPlacedRespDto, AppError>;
    // server-side clear after a successful checkout-from-cart
    async fn clear_cart(&self) -> Result<(), AppError>;
    async fn fetch_billing_address(&self) -> Result<Option<BillingAddressDto>, AppError>;
    async fn fetch_qr_codes(&self) -> Result<Vec<QrCodeDto>, AppError>;
}

pub mod app_backend {
    use super::*;

    pub use super::mock::MockBackendClient;

    pub fn build_context(
        cfg: &AppBackendCfg,
        logctx: Arc<AppLogContext>,
    ) -> Result<Box<dyn AbstractBackendClient>, AppError> {
        let obj = rest::AppRestBackendClient::try_build(cfg, logctx)?;
        Ok(Box::new(obj))
    }
}
