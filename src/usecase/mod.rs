mod add_to_cart;
mod place_order;
mod refresh_session;

pub use add_to_cart::{AddCartItemUsKsResult, AddCartItemUseCase};
pub use place_order::{PlaceOrderUsKsResult, PlaceOrderUseCase};
pub use refresh_session::{RefreshSessionUsKsResult, RefreshSessionUseCase};
