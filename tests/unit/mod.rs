mod eventstream;
mod sync;

use std::sync::Arc;

use rust_decimal::Decimal;

use shopfront::api::dto::BillingAddressDto;
use shopfront::constant::logging::{Destination, Level};
use shopfront::logging::AppLogContext;
use shopfront::model::ProductEntryModel;
use shopfront::{AppBasepathCfg, AppCartSyncCfg, AppLogHandlerCfg, AppLoggerCfg, AppLoggingCfg};

pub(crate) fn ut_setup_log_context() -> Arc<AppLogContext> {
    let cfg = AppLoggingCfg {
        handlers: vec![AppLogHandlerCfg {
            min_level: Level::DEBUG,
            destination: Destination::CONSOLE,
            alias: Arc::new("console".to_string()),
            path: None,
        }],
        loggers: vec![AppLoggerCfg {
            alias: Arc::new("shopfront".to_string()),
            handlers: vec!["console".to_string()],
            level: Some(Level::WARNING),
        }],
    };
    let basepath = AppBasepathCfg {
        system: ".".to_string(),
        service: ".".to_string(),
    };
    Arc::new(AppLogContext::new(&basepath, &cfg))
}

pub(crate) fn ut_setup_sync_cfg(
    debounce_millisecs: u32,
    max_flush_attempts: u8,
    backoff_base_millisecs: u32,
) -> AppCartSyncCfg {
    AppCartSyncCfg {
        debounce_millisecs,
        max_flush_attempts,
        backoff_base_millisecs,
    }
}

#[rustfmt::skip]
pub(crate) fn ut_setup_catalog_entries(
    data: Vec<(u64, u32, &str, i64, u32, bool)>,
) -> Vec<ProductEntryModel> {
    data.into_iter()
        .map(|d| ProductEntryModel {
            id_: d.0,
            seller_id: d.1,
            name: d.2.to_string(),
            description: format!("crop product {}", d.2),
            price: Decimal::new(d.3, 2),
            image: format!("img-{}.jpg", d.0),
            stock: d.4,
            best_seller: d.5,
        })
        .collect::<Vec<_>>()
}

pub(crate) fn ut_setup_billing_address() -> BillingAddressDto {
    BillingAddressDto {
        first_name: "Maria".to_string(),
        last_name: "Santos".to_string(),
        email: "maria.santos@example.com".to_string(),
        contact: "09171234567".to_string(),
        province: "Laguna".to_string(),
        city: "Calamba".to_string(),
        barangay: "Canlubang".to_string(),
        detail_address: "Blk 4 Lot 18 Mango St".to_string(),
        zip_code: "4027".to_string(),
    }
}
