//! Cart Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use miam_app::{
    domain::carts::records::{CartLineRecord, CartRecord},
    uuids::TypedUuid,
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The user owning the cart
    pub user_id: Uuid,

    /// `open` or `closed`
    pub status: String,

    /// Sum of every line total, in minor units
    pub subtotal: u64,

    /// Delivery fee of each distinct restaurant in the cart, summed
    pub delivery_fee: u64,

    /// Subtotal plus delivery fee
    pub total: u64,

    /// The lines in the cart
    pub items: Vec<CartLineResponse>,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        Self {
            uuid: cart.uuid.into_uuid(),
            user_id: cart.user_uuid.into_uuid(),
            status: cart.status.to_string(),
            subtotal: cart.subtotal,
            delivery_fee: cart.delivery_fee,
            total: cart.total(),
            items: cart.lines.into_iter().map(CartLineResponse::from).collect(),
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLineResponse {
    /// The menu item on this line
    pub menu_item_id: Uuid,

    /// Current name of the menu item, or a placeholder once it is deleted
    pub name: String,

    /// Restaurant serving the item, absent once the item is deleted
    pub restaurant_id: Option<Uuid>,

    pub quantity: u32,

    /// Price of one unit, in minor units
    pub unit_price: u64,

    /// `quantity * unit_price`
    pub line_total: u64,
}

impl From<CartLineRecord> for CartLineResponse {
    fn from(line: CartLineRecord) -> Self {
        Self {
            menu_item_id: line.menu_item_uuid.into_uuid(),
            name: line.display_name().to_string(),
            restaurant_id: line.restaurant_uuid.map(TypedUuid::into_uuid),
            quantity: line.quantity,
            unit_price: line.unit_price,
            line_total: line.line_total(),
        }
    }
}

/// Cart Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartUpdatedResponse {
    /// What happened to the cart
    pub message: String,

    /// The cart after the change
    pub cart: CartResponse,
}

impl CartUpdatedResponse {
    pub(crate) fn new(message: &str, cart: CartRecord) -> Self {
        Self {
            message: message.to_string(),
            cart: cart.into(),
        }
    }
}
