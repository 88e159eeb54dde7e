//! Order Data

use crate::domain::{
    carts::records::CartUuid,
    orders::records::{DeliveryAddress, OrderUuid},
    users::records::UserUuid,
};

/// Checkout request for a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub cart_uuid: CartUuid,
    pub delivery_address: DeliveryAddress,
    pub user_notes: Option<String>,
    pub delivery_notes: Option<String>,
}

/// Notes to replace on an order. `None` leaves a note untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderNotesUpdate {
    pub user_notes: Option<String>,
    pub delivery_notes: Option<String>,
}
