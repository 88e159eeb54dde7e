//! List Restaurants Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError,
    extensions::*,
    restaurants::{errors::into_api_error, handlers::get::RestaurantResponse},
    state::State,
};

/// List Restaurants Handler
///
/// Lists every restaurant that has not been deleted, ordered by name.
#[endpoint(tags("restaurants"), summary = "List Restaurants")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<RestaurantResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let restaurants = state
        .app
        .restaurants
        .list_restaurants()
        .await
        .map_err(into_api_error)?;

    Ok(Json(restaurants.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use miam_app::domain::restaurants::{MockRestaurantsService, records::RestaurantUuid};

    use crate::test_helpers::{make_restaurant, restaurants_service};

    use super::*;

    fn make_service(restaurants: MockRestaurantsService) -> Service {
        restaurants_service(restaurants, Router::with_path("restaurants").get(handler))
    }

    #[tokio::test]
    async fn test_list_restaurants_returns_each_restaurant() -> TestResult {
        let first = RestaurantUuid::new();
        let second = RestaurantUuid::new();

        let mut restaurants = MockRestaurantsService::new();

        restaurants
            .expect_list_restaurants()
            .once()
            .return_once(move || Ok(vec![make_restaurant(first), make_restaurant(second)]));

        let mut res = TestClient::get("http://example.com/restaurants")
            .send(&make_service(restaurants))
            .await;

        let body: Vec<RestaurantResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.iter().map(|r| r.uuid).collect::<Vec<_>>(),
            vec![first.into_uuid(), second.into_uuid()]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_list_restaurants_empty_returns_empty_array() -> TestResult {
        let mut restaurants = MockRestaurantsService::new();

        restaurants
            .expect_list_restaurants()
            .once()
            .return_once(|| Ok(Vec::new()));

        let mut res = TestClient::get("http://example.com/restaurants")
            .send(&make_service(restaurants))
            .await;

        let body: Vec<RestaurantResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.is_empty());

        Ok(())
    }
}
