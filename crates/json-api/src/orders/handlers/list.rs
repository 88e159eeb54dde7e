//! List User Orders Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use miam_app::domain::users::records::UserUuid;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, responses::OrderResponse},
    state::State,
};

/// List User Orders Handler
///
/// Returns every order placed by the user, newest first. A user without
/// orders gets an empty list.
#[endpoint(
    tags("orders"),
    summary = "List User Orders",
    responses(
        (status_code = StatusCode::OK, description = "Orders, possibly none"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_orders(UserUuid::from_uuid(user.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}
