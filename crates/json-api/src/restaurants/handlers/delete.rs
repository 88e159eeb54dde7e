//! Delete Restaurant Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use miam_app::domain::restaurants::records::RestaurantUuid;

use crate::{
    errors::ApiError, extensions::*, restaurants::errors::into_api_error, state::State,
};

/// Delete Restaurant Handler
///
/// Soft-deletes the restaurant. Its items disappear from open carts on their
/// next change.
#[endpoint(
    tags("restaurants"),
    summary = "Delete Restaurant",
    responses(
        (status_code = StatusCode::OK, description = "Restaurant deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Restaurant not found"),
    ),
)]
pub(crate) async fn handler(
    restaurant: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let restaurant = RestaurantUuid::from_uuid(restaurant.into_inner());

    state
        .app
        .restaurants
        .delete_restaurant(restaurant)
        .await
        .map_err(into_api_error)?;

    tracing::info!(restaurant_uuid = %restaurant, "deleted restaurant");

    Ok(StatusCode::OK)
}
