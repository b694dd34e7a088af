use rust_decimal::Decimal;

pub mod app_meta {
    pub const LABEL: &str = "shopfront";
    pub const API_VERSION: &str = "0.0.1";
}

pub mod env_vars {
    pub const SYS_BASEPATH: &str = "SYS_BASE_PATH";
    pub const SERVICE_BASEPATH: &str = "SERVICE_BASE_PATH";
    // relative path starting from the service home folder
    pub const CFG_FILEPATH: &str = "CONFIG_FILE_PATH";
    pub const EXPECTED_LABELS: [&str; 3] = [SYS_BASEPATH, SERVICE_BASEPATH, CFG_FILEPATH];
}

pub mod hard_limit {
    // a single session cart never grows beyond this number of distinct lines
    pub const MAX_CART_LINES: usize = 200;
    // pending-sync entries accumulated between flushes
    pub const MAX_PENDING_SYNC_ITEMS: usize = 500;
    pub const MIN_DEBOUNCE_MILLISECS: u32 = 50;
    pub const MAX_DEBOUNCE_MILLISECS: u32 = 30_000;
    pub const MAX_FLUSH_ATTEMPTS: u8 = 10;
}

// flat fee charged on delivery orders, in the storefront's single
// currency unit with 2-digit fraction
pub fn delivery_shipping_fee() -> Decimal {
    Decimal::new(3000, 2)
}

pub(crate) mod api {
    // resource paths under the configured backend origin,
    // kept verbatim from the storefront REST contract
    pub(crate) const ADD_TO_CART: &str = "/api/addToCart";
    pub(crate) const DISPLAY_CART: &str = "/api/displayCart";
    pub(crate) const CHECKOUT: &str = "/api/checkout";
    pub(crate) const PLACE_ORDER_CLEAR_CART: &str = "/api/placeOrderclearCart";
    pub(crate) const GET_BILLING_ADDRESS: &str = "/api/getBillingAddress";
    pub(crate) const GET_QR_CODES: &str = "/api/getQrCodes";
}

pub(crate) const HTTP_CONTENT_TYPE_JSON: &str = "application/json";
pub(crate) const HTTP_MULTIPART_BOUNDARY: &str = "shopfront-checkout-boundary";

pub const REGEX_EMAIL_RFC5322: &str = r#"(?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")@(?:(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?|\[(?:(?:(2(5[0-5]|[0-4][0-9])|1[0-9][0-9]|[1-9]?[0-9]))\.){3}(?:(2(5[0-5]|[0-4][0-9])|1[0-9][0-9]|[1-9]?[0-9])|[a-z0-9-]*[a-z0-9]:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\])"#;

pub mod logging {
    use serde::Deserialize;

    #[allow(clippy::upper_case_acronyms)]
    #[derive(Deserialize)]
    pub enum Level {
        TRACE,
        DEBUG,
        INFO,
        WARNING,
        ERROR,
        FATAL,
    }

    #[allow(clippy::upper_case_acronyms)]
    #[derive(Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Destination {
        CONSOLE,
        LOCALFS,
    }
}
