mod badge;
mod cart;
mod checkout;
mod product;

pub use badge::{BadgeModel, BadgeSetModel};
pub use cart::{CartLineModel, CartModel, CartSnapshot};
pub use checkout::{
    BillingAddressModel, CheckoutModel, CheckoutOrigin, ProofOfPaymentModel,
};
pub use product::{ProductCatalogModel, ProductEntryModel, StockProjection};
