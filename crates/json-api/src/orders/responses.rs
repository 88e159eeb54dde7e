//! Order Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use miam_app::domain::orders::records::{
    Coordinates, DeliveryAddress, OrderLineRecord, OrderRecord,
};

/// Delivery Address
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeliveryAddressPayload {
    pub street: String,
    pub city: String,
    pub postal_code: String,

    #[serde(default)]
    pub coordinates: Option<CoordinatesPayload>,
}

/// Coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct CoordinatesPayload {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<DeliveryAddressPayload> for DeliveryAddress {
    fn from(payload: DeliveryAddressPayload) -> Self {
        Self {
            street: payload.street,
            city: payload.city,
            postal_code: payload.postal_code,
            coordinates: payload.coordinates.map(|coordinates| Coordinates {
                latitude: coordinates.latitude,
                longitude: coordinates.longitude,
            }),
        }
    }
}

impl From<DeliveryAddress> for DeliveryAddressPayload {
    fn from(address: DeliveryAddress) -> Self {
        Self {
            street: address.street,
            city: address.city,
            postal_code: address.postal_code,
            coordinates: address.coordinates.map(|coordinates| CoordinatesPayload {
                latitude: coordinates.latitude,
                longitude: coordinates.longitude,
            }),
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    pub user_id: Uuid,

    /// The cart the order was placed from
    pub cart_id: Uuid,

    /// Cart subtotal when the order was placed
    pub subtotal: u64,

    /// Cart delivery fee when the order was placed
    pub delivery_fee: u64,

    /// Amount charged, fixed at placement
    pub total_amount: u64,

    pub delivery_address: DeliveryAddressPayload,

    /// One of `pending`, `confirmed`, `in-preparation`, `out-for-delivery`,
    /// `delivered`, `cancelled`
    pub status: String,

    pub user_notes: Option<String>,
    pub delivery_notes: Option<String>,

    /// Cart lines as they were at checkout
    pub items: Vec<OrderLineResponse>,

    /// The date and time the order was placed
    pub placed_at: String,

    /// The date and time the order was last updated
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            user_id: order.user_uuid.into_uuid(),
            cart_id: order.cart_uuid.into_uuid(),
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            total_amount: order.total_amount,
            delivery_address: order.delivery_address.into(),
            status: order.status.to_string(),
            user_notes: order.user_notes,
            delivery_notes: order.delivery_notes,
            items: order.lines.into_iter().map(OrderLineResponse::from).collect(),
            placed_at: order.placed_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderLineResponse {
    pub menu_item_id: Uuid,
    pub quantity: u32,
    pub unit_price: u64,
    pub line_total: u64,
}

impl From<OrderLineRecord> for OrderLineResponse {
    fn from(line: OrderLineRecord) -> Self {
        Self {
            menu_item_id: line.menu_item_uuid.into_uuid(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            line_total: line.line_total(),
        }
    }
}
