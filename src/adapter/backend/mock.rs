use std::result::Result;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Local;

use crate::api::dto::{
    BillingAddressDto, CartDto, CartLineSyncDto, CartSyncReqDto, CheckoutReqDto,
    OrderPlacedRespDto, QrCodeDto,
};
use crate::error::{AppError, AppErrorCode};
use crate::model::ProofOfPaymentModel;

use super::AbstractBackendClient;

// clones share the same scripted state, tests keep one handle for
// assertions after boxing another into the trait object
#[derive(Clone, Default)]
pub struct MockBackendClient {
    inner: Arc<Mutex<MockInner>>,
}

#[derive(Default)]
struct MockInner {
    // each element is one flushed batch, in arrival order
    flushed_batches: Vec<Vec<CartLineSyncDto>>,
    // number of upcoming add-cart-lines calls forced to fail
    num_sync_failures: u8,
    clear_cart_fails: bool,
    checkout_fails: bool,
    num_clear_calls: u32,
    num_checkout_calls: u32,
    cart_snapshot: Option<CartDto>,
    billing_snapshot: Option<BillingAddressDto>,
    qr_codes: Vec<QrCodeDto>,
}

impl MockBackendClient {
    pub fn build() -> Self {
        Self::default()
    }

    pub fn script_sync_failures(&self, num: u8) {
        self.inner.lock().unwrap().num_sync_failures = num;
    }
    pub fn script_clear_cart_failure(&self, flag: bool) {
        self.inner.lock().unwrap().clear_cart_fails = flag;
    }
    pub fn script_checkout_failure(&self, flag: bool) {
        self.inner.lock().unwrap().checkout_fails = flag;
    }
    pub fn script_cart_snapshot(&self, data: CartDto) {
        self.inner.lock().unwrap().cart_snapshot = Some(data);
    }
    pub fn script_billing_snapshot(&self, data: BillingAddressDto) {
        self.inner.lock().unwrap().billing_snapshot = Some(data);
    }
    pub fn script_qr_codes(&self, data: Vec<QrCodeDto>) {
        self.inner.lock().unwrap().qr_codes = data;
    }

    pub fn flushed_batches(&self) -> Vec<Vec<CartLineSyncDto>> {
        self.inner.lock().unwrap().flushed_batches.clone()
    }
    pub fn num_clear_calls(&self) -> u32 {
        self.inner.lock().unwrap().num_clear_calls
    }
    pub fn num_checkout_calls(&self) -> u32 {
        self.inner.lock().unwrap().num_checkout_calls
    }
} // end of impl MockBackendClient

#[async_trait]
impl AbstractBackendClient for MockBackendClient {
    async fn add_cart_lines(&self, req: CartSyncReqDto) -> Result<(), AppError> {
        let mut guard = self.inner.lock().unwrap();
        if guard.num_sync_failures > 0 {
            guard.num_sync_failures -= 1;
            return Err(AppError {
                code: AppErrorCode::RemoteUnavail,
                detail: Some("scripted-sync-failure".to_string()),
            });
        }
        guard.flushed_batches.push(req.items);
        Ok(())
    }

    async fn fetch_cart(&self) -> Result<CartDto, AppError> {
        let mut guard = self.inner.lock().unwrap();
        match guard.cart_snapshot.take() {
            Some(d) => Ok(d),
            None => Ok(CartDto { lines: Vec::new() }),
        }
    }

    async fn submit_checkout(
        &self,
        _req: CheckoutReqDto,
        _proof: Option<ProofOfPaymentModel>,
    ) -> Result<OrderPlacedRespDto, AppError> {
        let mut guard = self.inner.lock().unwrap();
        guard.num_checkout_calls += 1;
        if guard.checkout_fails {
            Err(AppError {
                code: AppErrorCode::RemoteUnavail,
                detail: Some("scripted-checkout-failure".to_string()),
            })
        } else {
            Ok(OrderPlacedRespDto {
                order_id: "mock-order-id".to_string(),
                time: Local::now().fixed_offset(),
            })
        }
    }

    async fn clear_cart(&self) -> Result<(), AppError> {
        let mut guard = self.inner.lock().unwrap();
        guard.num_clear_calls += 1;
        if guard.clear_cart_fails {
            Err(AppError {
                code: AppErrorCode::RemoteUnavail,
                detail: Some("scripted-clear-failure".to_string()),
            })
        } else {
            Ok(())
        }
    }

    async fn fetch_billing_address(&self) -> Result<Option<BillingAddressDto>, AppError> {
        let guard = self.inner.lock().unwrap();
        Ok(guard.billing_snapshot.clone())
    }

    async fn fetch_qr_codes(&self) -> Result<Vec<QrCodeDto>, AppError> {
        let guard = self.inner.lock().unwrap();
        Ok(guard.qr_codes.clone())
    }
} // end of impl AbstractBackendClient for MockBackendClient
