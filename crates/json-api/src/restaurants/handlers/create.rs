//! Create Restaurant Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use miam_app::domain::restaurants::{data::NewRestaurant, records::RestaurantUuid};

use crate::{
    errors::ApiError,
    extensions::*,
    restaurants::{
        errors::into_api_error,
        handlers::get::{LocationPayload, RestaurantResponse},
    },
    state::State,
};

/// Create Restaurant Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateRestaurantRequest {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Delivery fee in minor units
    pub delivery_fee: u64,

    pub location: LocationPayload,
}

impl From<CreateRestaurantRequest> for NewRestaurant {
    fn from(request: CreateRestaurantRequest) -> Self {
        NewRestaurant {
            uuid: RestaurantUuid::new(),
            name: request.name,
            description: request.description,
            delivery_fee: request.delivery_fee,
            location: request.location.into(),
        }
    }
}

/// Create Restaurant Handler
#[endpoint(
    tags("restaurants"),
    summary = "Create Restaurant",
    responses(
        (status_code = StatusCode::CREATED, description = "Restaurant created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing name or invalid location"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateRestaurantRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let restaurant = state
        .app
        .restaurants
        .create_restaurant(json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/restaurants/{}", restaurant.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(restaurant.into()))
}
