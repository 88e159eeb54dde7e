//! Update Order Notes Handler

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

use miam_app::domain::orders::{data::OrderNotesUpdate, records::OrderUuid};

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, responses::OrderResponse},
    state::State,
};

/// Update Order Notes Request
///
/// Omitted notes are left as they are.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateOrderNotesRequest {
    #[serde(default)]
    pub user_notes: Option<String>,

    #[serde(default)]
    pub delivery_notes: Option<String>,
}

impl From<UpdateOrderNotesRequest> for OrderNotesUpdate {
    fn from(request: UpdateOrderNotesRequest) -> Self {
        Self {
            user_notes: request.user_notes,
            delivery_notes: request.delivery_notes,
        }
    }
}

/// Update Order Notes Handler
#[endpoint(
    tags("orders"),
    summary = "Update Order Notes",
    responses(
        (status_code = StatusCode::OK, description = "Notes updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderNotesRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let updated = state
        .app
        .orders
        .update_notes(OrderUuid::from_uuid(order.into_inner()), json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(updated.into()))
}
