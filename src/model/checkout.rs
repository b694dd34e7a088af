use std::result::Result as DefaultResult;

use regex::Regex;
use rust_decimal::Decimal;

use crate::api::dto::{
    AddrFieldErrorReason, BillingAddressDto, BillingAddressErrorDto, CheckoutBlockReason,
    CheckoutReqDto, OrderMethodDto, PaymentMethodDto,
};
use crate::constant::{delivery_shipping_fee, REGEX_EMAIL_RFC5322};

use super::cart::CartLineModel;

#[derive(Debug)]
pub struct BillingAddressModel {
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

#[derive(Clone)]
pub struct ProofOfPaymentModel {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

// whether a successful placement clears the session cart
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOrigin {
    FromCart,
    BuyNow,
}

pub struct CheckoutModel {
    pub origin: CheckoutOrigin,
    pub lines: Vec<CartLineModel>,
    pub order_method: Option<OrderMethodDto>,
    pub payment_method: Option<PaymentMethodDto>,
    pub billing: Option<BillingAddressModel>,
    pub proof: Option<ProofOfPaymentModel>,
    pub note: Option<String>,
}

impl From<BillingAddressModel> for BillingAddressDto {
    fn from(value: BillingAddressModel) -> BillingAddressDto {
        BillingAddressDto {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            contact: value.contact,
            province: value.province,
            city: value.city,
            barangay: value.barangay,
            detail_address: value.detail_address,
            zip_code: value.zip_code,
        }
    }
}

impl TryFrom<BillingAddressDto> for BillingAddressModel {
    type Error = BillingAddressErrorDto;
    fn try_from(value: BillingAddressDto) -> DefaultResult<Self, Self::Error> {
        let error = Self::Error {
            first_name: Self::check_nonempty(value.first_name.as_str()),
            last_name: Self::check_nonempty(value.last_name.as_str()),
            email: Self::check_email(value.email.as_str()),
            contact: Self::check_digits(value.contact.as_str()),
            province: Self::check_nonempty(value.province.as_str()),
            city: Self::check_nonempty(value.city.as_str()),
            barangay: Self::check_nonempty(value.barangay.as_str()),
            detail_address: Self::check_nonempty(value.detail_address.as_str()),
            zip_code: Self::check_digits(value.zip_code.as_str()),
        };
        if error.is_clean() {
            Ok(Self {
                first_name: value.first_name,
                last_name: value.last_name,
                email: value.email,
                contact: value.contact,
                province: value.province,
                city: value.city,
                barangay: value.barangay,
                detail_address: value.detail_address,
                zip_code: value.zip_code,
            })
        } else {
            Err(error)
        }
    } // end of fn try_from
}

impl BillingAddressModel {
    fn check_nonempty(value: &str) -> Option<AddrFieldErrorReason> {
        if value.trim().is_empty() {
            Some(AddrFieldErrorReason::Empty)
        } else if value.chars().any(char::is_control) {
            Some(AddrFieldErrorReason::InvalidChar)
        } else {
            None
        }
    }
    fn check_email(value: &str) -> Option<AddrFieldErrorReason> {
        if value.is_empty() {
            return Some(AddrFieldErrorReason::Empty);
        }
        let re = Regex::new(REGEX_EMAIL_RFC5322).unwrap();
        if let Some(_v) = re.find(value) {
            if _v.start() == 0 && value.len() == _v.end() {
                None // given data should match the mail pattern exactly once
            } else {
                Some(AddrFieldErrorReason::InvalidChar)
            }
        } else {
            Some(AddrFieldErrorReason::InvalidChar)
        }
    }
    fn check_digits(value: &str) -> Option<AddrFieldErrorReason> {
        if value.is_empty() {
            Some(AddrFieldErrorReason::Empty)
        } else if !value.chars().all(|c| c.is_ascii_digit()) {
            Some(AddrFieldErrorReason::InvalidChar)
        } else {
            None
        }
    }
} // end of impl BillingAddressModel

impl CheckoutModel {
    pub fn new(origin: CheckoutOrigin, lines: Vec<CartLineModel>) -> Self {
        Self {
            origin,
            lines,
            order_method: None,
            payment_method: None,
            billing: None,
            proof: None,
            note: None,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .map(|ln| ln.price * Decimal::from(ln.quantity))
            .sum::<Decimal>()
    }

    pub fn shipping_fee(&self) -> Decimal {
        match self.order_method {
            Some(OrderMethodDto::Delivery) => delivery_shipping_fee(),
            _others => Decimal::ZERO,
        }
    }

    pub fn total(&self) -> Decimal {
        self.subtotal() + self.shipping_fee()
    }

    // the submit control is enabled only when this comes back empty
    pub fn submission_blockers(&self) -> Vec<CheckoutBlockReason> {
        let mut out = Vec::new();
        if self.lines.is_empty() {
            out.push(CheckoutBlockReason::EmptyOrderLines);
        }
        if self.billing.is_none() {
            out.push(CheckoutBlockReason::AddressIncomplete);
        }
        if self.order_method.is_none() {
            out.push(CheckoutBlockReason::OrderMethodMissing);
        }
        match self.payment_method {
            None => out.push(CheckoutBlockReason::PaymentMethodMissing),
            Some(PaymentMethodDto::CashOnDelivery) => {}
            Some(_ewallet) => {
                // e-wallet payment requires an uploaded proof file
                if self.proof.is_none() {
                    out.push(CheckoutBlockReason::PaymentProofMissing);
                }
            }
        }
        out
    }

    pub fn can_submit(&self) -> bool {
        self.submission_blockers().is_empty()
    }

    pub fn to_request(self) -> DefaultResult<(CheckoutReqDto, Option<ProofOfPaymentModel>), Vec<CheckoutBlockReason>> {
        let blockers = self.submission_blockers();
        if !blockers.is_empty() {
            return Err(blockers);
        }
        let (subtotal, shipping_fee, total) = (self.subtotal(), self.shipping_fee(), self.total());
        let req = CheckoutReqDto {
            items: self.lines.into_iter().map(Into::into).collect::<Vec<_>>(),
            order_method: self.order_method.unwrap(),
            payment_method: self.payment_method.unwrap(),
            billing: self.billing.unwrap().into(),
            note: self.note,
            subtotal,
            shipping_fee,
            total,
        };
        Ok((req, self.proof))
    } // end of fn to_request
} // end of impl CheckoutModel
