//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use miam_app::domain::orders::records::{OrderStatus, OrderUuid};

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, responses::OrderResponse},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// Target status
    pub status: String,
}

/// Update Order Status Handler
///
/// Moves an order to any lifecycle status.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(json, depot),
    fields(order_uuid = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let order = OrderUuid::from_uuid(order.into_inner());

    let status = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .map_err(|error| ApiError::invalid_argument(error.to_string()))?;

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("status", status.as_str());

    let updated = state
        .app
        .orders
        .update_status(order, status)
        .await
        .map_err(into_api_error)?;

    if status.is_terminal() {
        tracing::info!(order_uuid = %order, %status, "order reached a final status");
    }

    Ok(Json(updated.into()))
}
