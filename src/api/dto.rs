use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// one entry per add-to-cart action, quantity is implicitly 1,
// the backend merges repeated product IDs on its side
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CartLineSyncDto {
    pub product_id: u64,
    pub seller_id: u32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
}

#[derive(Deserialize, Serialize)]
pub struct CartSyncReqDto {
    pub items: Vec<CartLineSyncDto>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct CartLineDto {
    pub product_id: u64,
    pub seller_id: u32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub quantity: u32,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct CartDto {
    pub lines: Vec<CartLineDto>,
}

// wire labels kept verbatim from the storefront REST contract
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMethodDto {
    #[serde(rename = "delivery")]
    Delivery,
    #[serde(rename = "pick up")]
    PickUp,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethodDto {
    #[serde(rename = "cash on delivery")]
    CashOnDelivery,
    #[serde(rename = "gcash")]
    GCash,
    #[serde(rename = "maya")]
    Maya,
}

#[derive(Deserialize, Serialize, Clone)]
pub struct BillingAddressDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub contact: String,
    pub province: String,
    pub city: String,
    pub barangay: String,
    pub detail_address: String,
    pub zip_code: String,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
pub enum AddrFieldErrorReason {
    Empty,
    InvalidChar,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct BillingAddressErrorDto {
    pub first_name: Option<AddrFieldErrorReason>,
    pub last_name: Option<AddrFieldErrorReason>,
    pub email: Option<AddrFieldErrorReason>,
    pub contact: Option<AddrFieldErrorReason>,
    pub province: Option<AddrFieldErrorReason>,
    pub city: Option<AddrFieldErrorReason>,
    pub barangay: Option<AddrFieldErrorReason>,
    pub detail_address: Option<AddrFieldErrorReason>,
    pub zip_code: Option<AddrFieldErrorReason>,
}

impl BillingAddressErrorDto {
    pub fn is_clean(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.contact.is_none()
            && self.province.is_none()
            && self.city.is_none()
            && self.barangay.is_none()
            && self.detail_address.is_none()
            && self.zip_code.is_none()
    }
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub enum CheckoutBlockReason {
    AddressIncomplete,
    OrderMethodMissing,
    PaymentMethodMissing,
    PaymentProofMissing,
    EmptyOrderLines,
}

// JSON part of the multipart checkout submission, the proof-of-payment
// file rides along as a separate binary part
#[derive(Deserialize, Serialize)]
pub struct CheckoutReqDto {
    pub items: Vec<CartLineDto>,
    pub order_method: OrderMethodDto,
    pub payment_method: PaymentMethodDto,
    pub billing: BillingAddressDto,
    pub note: Option<String>,
    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub total: Decimal,
}

#[derive(Deserialize, Serialize)]
pub struct OrderPlacedRespDto {
    pub order_id: String,
    pub time: DateTime<FixedOffset>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct QrCodeDto {
    pub payment_method: PaymentMethodDto,
    pub image: String,
    pub available: bool,
}
