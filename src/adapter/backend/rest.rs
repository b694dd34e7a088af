use std::future::Future;
use std::result::Result;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hyper::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use hyper::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tokio_native_tls::{native_tls, TlsConnector};

use crate::api::dto::{
    BillingAddressDto, CartDto, CartSyncReqDto, CheckoutReqDto, OrderPlacedRespDto, QrCodeDto,
};
use crate::config::AppBackendCfg;
use crate::constant::{api as api_path, HTTP_CONTENT_TYPE_JSON, HTTP_MULTIPART_BOUNDARY};
use crate::error::{AppError, AppErrorCode};
use crate::logging::AppLogContext;
use crate::model::ProofOfPaymentModel;

use super::base_client::BaseClient;
use super::AbstractBackendClient;

pub(super) struct AppRestBackendClient {
    host: String,
    port: u16,
    secure_connector: Option<TlsConnector>,
    // per-call deadline covering connect, request, and body collection
    timeout_secs: u16,
    logctx: Arc<AppLogContext>,
}

impl AppRestBackendClient {
    pub(super) fn try_build(
        cfg: &AppBackendCfg,
        logctx: Arc<AppLogContext>,
    ) -> Result<Self, AppError> {
        let secure_connector = if cfg.secure {
            let inner = native_tls::TlsConnector::new().map_err(|e| AppError {
                code: AppErrorCode::CryptoFailure,
                detail: Some(e.to_string()),
            })?;
            Some(TlsConnector::from(inner))
        } else {
            None
        };
        Ok(Self {
            host: cfg.host.clone(),
            port: cfg.port,
            secure_connector,
            timeout_secs: cfg.timeout_secs,
            logctx,
        })
    }

    async fn connect(&self) -> Result<BaseClient, AppError> {
        BaseClient::try_build(
            self.host.clone(),
            self.port,
            self.secure_connector.as_ref(),
            self.logctx.clone(),
        )
        .await
    }

    async fn within_deadline<T, F>(&self, path: &str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        let limit = Duration::from_secs(u64::from(self.timeout_secs));
        match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_elapsed) => Err(AppError {
                code: AppErrorCode::IOerror(std::io::ErrorKind::TimedOut),
                detail: Some(format!("path:{}, limit-secs:{}", path, self.timeout_secs)),
            }),
        }
    }

    fn json_headers() -> Vec<(HeaderName, HeaderValue)> {
        vec![
            (CONTENT_TYPE, HeaderValue::from_static(HTTP_CONTENT_TYPE_JSON)),
            (ACCEPT, HeaderValue::from_static(HTTP_CONTENT_TYPE_JSON)),
        ]
    }

    fn parse_json<T: DeserializeOwned>(&self, raw: Vec<u8>) -> Result<T, AppError> {
        serde_json::from_slice::<T>(raw.as_slice()).map_err(|e| AppError {
            code: AppErrorCode::RemoteInvalidReply,
            detail: Some(format!("{}:{}, {}", self.host.as_str(), self.port, e)),
        })
    }

    fn error_from_status(&self, path: &str, status: StatusCode) -> AppError {
        AppError {
            code: AppErrorCode::RemoteInvalidReply,
            detail: Some(format!(
                "host:{}:{}, path:{}, status:{}",
                self.host.as_str(),
                self.port,
                path,
                status.as_u16()
            )),
        }
    }

    fn render_multipart(
        req: &CheckoutReqDto,
        proof: Option<&ProofOfPaymentModel>,
    ) -> Result<Vec<u8>, AppError> {
        let order_jsn = serde_json::to_vec(req).map_err(|e| AppError {
            code: AppErrorCode::InvalidInput,
            detail: Some(e.to_string()),
        })?;
        let boundary = HTTP_MULTIPART_BOUNDARY;
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"order\"\r\n\
                 Content-Type: {HTTP_CONTENT_TYPE_JSON}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(order_jsn.as_slice());
        body.extend_from_slice(b"\r\n");
        if let Some(p) = proof {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"proof\"; \
                     filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    p.filename.as_str(),
                    p.content_type.as_str()
                )
                .as_bytes(),
            );
            body.extend_from_slice(p.data.as_slice());
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        Ok(body)
    } // end of fn render_multipart
} // end of impl AppRestBackendClient

#[async_trait]
impl AbstractBackendClient for AppRestBackendClient {
    async fn add_cart_lines(&self, req: CartSyncReqDto) -> Result<(), AppError> {
        let rawbody = serde_json::to_vec(&req).map_err(|e| AppError {
            code: AppErrorCode::InvalidInput,
            detail: Some(e.to_string()),
        })?;
        let (_raw, status) = self
            .within_deadline(api_path::ADD_TO_CART, async {
                let mut _client = self.connect().await?;
                _client
                    .execute(
                        api_path::ADD_TO_CART,
                        Method::POST,
                        Self::json_headers(),
                        Some(rawbody),
                    )
                    .await
            })
            .await?;
        if status.is_success() {
            Ok(())
        } else {
            Err(self.error_from_status(api_path::ADD_TO_CART, status))
        }
    }

    async fn fetch_cart(&self) -> Result<CartDto, AppError> {
        let (raw, status) = self
            .within_deadline(api_path::DISPLAY_CART, async {
                let mut _client = self.connect().await?;
                _client
                    .execute(
                        api_path::DISPLAY_CART,
                        Method::GET,
                        Self::json_headers(),
                        None,
                    )
                    .await
            })
            .await?;
        if status.is_success() {
            self.parse_json::<CartDto>(raw)
        } else {
            Err(self.error_from_status(api_path::DISPLAY_CART, status))
        }
    }

    async fn submit_checkout(
        &self,
        req: CheckoutReqDto,
        proof: Option<ProofOfPaymentModel>,
    ) -> Result<OrderPlacedRespDto, AppError> {
        let rawbody = Self::render_multipart(&req, proof.as_ref())?;
        let ctype = format!("multipart/form-data; boundary={HTTP_MULTIPART_BOUNDARY}");
        let ctype_value = HeaderValue::from_str(ctype.as_str()).map_err(|e| AppError {
            code: AppErrorCode::InvalidInput,
            detail: Some(e.to_string()),
        })?;
        let headers = vec![
            (CONTENT_TYPE, ctype_value),
            (ACCEPT, HeaderValue::from_static(HTTP_CONTENT_TYPE_JSON)),
        ];
        let (raw, status) = self
            .within_deadline(api_path::CHECKOUT, async {
                let mut _client = self.connect().await?;
                _client
                    .execute(api_path::CHECKOUT, Method::POST, headers, Some(rawbody))
                    .await
            })
            .await?;
        if status.is_success() {
            self.parse_json::<OrderPlacedRespDto>(raw)
        } else {
            Err(self.error_from_status(api_path::CHECKOUT, status))
        }
    } // end of fn submit_checkout

    async fn clear_cart(&self) -> Result<(), AppError> {
        let (_raw, status) = self
            .within_deadline(api_path::PLACE_ORDER_CLEAR_CART, async {
                let mut _client = self.connect().await?;
                _client
                    .execute(
                        api_path::PLACE_ORDER_CLEAR_CART,
                        Method::DELETE,
                        Self::json_headers(),
                        None,
                    )
                    .await
            })
            .await?;
        if status.is_success() {
            Ok(())
        } else {
            Err(self.error_from_status(api_path::PLACE_ORDER_CLEAR_CART, status))
        }
    }

    async fn fetch_billing_address(&self) -> Result<Option<BillingAddressDto>, AppError> {
        let (raw, status) = self
            .within_deadline(api_path::GET_BILLING_ADDRESS, async {
                let mut _client = self.connect().await?;
                _client
                    .execute(
                        api_path::GET_BILLING_ADDRESS,
                        Method::GET,
                        Self::json_headers(),
                        None,
                    )
                    .await
            })
            .await?;
        if status.is_success() {
            let parsed = self.parse_json::<BillingAddressDto>(raw)?;
            Ok(Some(parsed))
        } else if status == StatusCode::NOT_FOUND {
            Ok(None) // a fresh account has no saved address yet
        } else {
            Err(self.error_from_status(api_path::GET_BILLING_ADDRESS, status))
        }
    }

    async fn fetch_qr_codes(&self) -> Result<Vec<QrCodeDto>, AppError> {
        let (raw, status) = self
            .within_deadline(api_path::GET_QR_CODES, async {
                let mut _client = self.connect().await?;
                _client
                    .execute(
                        api_path::GET_QR_CODES,
                        Method::GET,
                        Self::json_headers(),
                        None,
                    )
                    .await
            })
            .await?;
        if status.is_success() {
            self.parse_json::<Vec<QrCodeDto>>(raw)
        } else {
            Err(self.error_from_status(api_path::GET_QR_CODES, status))
        }
    }
} // end of impl AbstractBackendClient for AppRestBackendClient
