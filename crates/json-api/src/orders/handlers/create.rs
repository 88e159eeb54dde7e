//! Create Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use miam_app::domain::{
    carts::records::CartUuid,
    orders::{data::NewOrder, records::OrderUuid},
    users::records::UserUuid,
};

use crate::{
    errors::ApiError,
    extensions::*,
    observability,
    orders::{
        errors::into_api_error,
        responses::{DeliveryAddressPayload, OrderResponse},
    },
    state::State,
};

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    /// The user checking out, who must own the cart
    pub user_id: Uuid,

    /// The open cart to check out
    #[serde(alias = "panierId")]
    pub cart_id: Uuid,

    pub delivery_address: DeliveryAddressPayload,

    #[serde(default)]
    pub user_notes: Option<String>,

    #[serde(default)]
    pub delivery_notes: Option<String>,
}

impl CreateOrderRequest {
    fn into_new_order(self, uuid: OrderUuid) -> NewOrder {
        NewOrder {
            uuid,
            user_uuid: UserUuid::from_uuid(self.user_id),
            cart_uuid: CartUuid::from_uuid(self.cart_id),
            delivery_address: self.delivery_address.into(),
            user_notes: self.user_notes,
            delivery_notes: self.delivery_notes,
        }
    }
}

/// Create Order Handler
///
/// Checks out a cart: freezes its totals into a pending order and closes it.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid address, empty or closed cart"),
        (status_code = StatusCode::FORBIDDEN, description = "Cart belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        cart_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let uuid = OrderUuid::new();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(request.user_id));
    span.record("cart_uuid", tracing::field::display(request.cart_id));
    span.record("order_uuid", tracing::field::display(uuid));

    let order = state
        .app
        .orders
        .create_order(request.into_new_order(uuid))
        .await
        .map_err(into_api_error)?;

    tracing::info!(
        order_uuid = %order.uuid,
        cart_uuid = %order.cart_uuid,
        total_amount = order.total_amount,
        "placed order and closed cart"
    );

    observability::record_order_placed();

    res.status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
