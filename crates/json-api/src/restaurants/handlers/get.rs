//! Get Restaurant Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use miam_app::domain::restaurants::records::{GeoPoint, RestaurantRecord, RestaurantUuid};

use crate::{
    errors::ApiError, extensions::*, restaurants::errors::into_api_error, state::State,
};

/// Location
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct LocationPayload {
    pub longitude: f64,
    pub latitude: f64,
}

impl From<LocationPayload> for GeoPoint {
    fn from(location: LocationPayload) -> Self {
        Self {
            longitude: location.longitude,
            latitude: location.latitude,
        }
    }
}

/// Rating
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RatingResponse {
    /// Mean of all current ratings, 0 without reviews
    pub average: f64,

    /// Number of reviews
    pub count: u64,
}

/// Restaurant Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RestaurantResponse {
    pub uuid: Uuid,
    pub name: String,
    pub description: Option<String>,

    /// Charged once per cart that holds any of the restaurant's items
    pub delivery_fee: u64,

    pub location: LocationPayload,
    pub rating: RatingResponse,
    pub created_at: String,
    pub updated_at: String,
}

impl From<RestaurantRecord> for RestaurantResponse {
    fn from(restaurant: RestaurantRecord) -> Self {
        Self {
            uuid: restaurant.uuid.into_uuid(),
            name: restaurant.name,
            description: restaurant.description,
            delivery_fee: restaurant.delivery_fee,
            location: LocationPayload {
                longitude: restaurant.location.longitude,
                latitude: restaurant.location.latitude,
            },
            rating: RatingResponse {
                average: restaurant.rating.average(),
                count: restaurant.rating.count,
            },
            created_at: restaurant.created_at.to_string(),
            updated_at: restaurant.updated_at.to_string(),
        }
    }
}

/// Get Restaurant Handler
#[endpoint(tags("restaurants"), summary = "Get Restaurant")]
pub(crate) async fn handler(
    restaurant: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let restaurant = state
        .app
        .restaurants
        .get_restaurant(RestaurantUuid::from_uuid(restaurant.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(restaurant.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use miam_app::domain::restaurants::{MockRestaurantsService, RestaurantsServiceError};

    use crate::test_helpers::{make_restaurant, restaurants_service};

    use super::*;

    fn make_service(restaurants: MockRestaurantsService) -> Service {
        restaurants_service(
            restaurants,
            Router::with_path("restaurants/{restaurant}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_restaurant_reports_derived_average() -> TestResult {
        let uuid = RestaurantUuid::new();

        let mut restaurants = MockRestaurantsService::new();

        restaurants
            .expect_get_restaurant()
            .once()
            .withf(move |r| *r == uuid)
            .return_once(move |_| Ok(make_restaurant(uuid)));

        let mut res = TestClient::get(format!("http://example.com/restaurants/{uuid}"))
            .send(&make_service(restaurants))
            .await;

        let body: RestaurantResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.rating.count, 2);
        assert!(
            (body.rating.average - 3.5).abs() < f64::EPSILON,
            "expected an average of 3.5, got {}",
            body.rating.average
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_get_deleted_restaurant_returns_404() -> TestResult {
        let mut restaurants = MockRestaurantsService::new();

        restaurants
            .expect_get_restaurant()
            .once()
            .return_once(|_| Err(RestaurantsServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/restaurants/{}",
            RestaurantUuid::new()
        ))
        .send(&make_service(restaurants))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
