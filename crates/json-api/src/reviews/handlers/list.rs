//! List Restaurant Reviews Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use miam_app::domain::restaurants::records::RestaurantUuid;

use crate::{
    errors::ApiError,
    extensions::*,
    reviews::{errors::into_api_error, responses::RestaurantReviewResponse},
    state::State,
};

/// List Restaurant Reviews Handler
///
/// Reviews of a restaurant, newest first, each with its author's name. A
/// restaurant without reviews gets an empty list.
#[endpoint(
    tags("reviews"),
    summary = "List Restaurant Reviews",
    responses(
        (status_code = StatusCode::OK, description = "Reviews, possibly none"),
        (status_code = StatusCode::NOT_FOUND, description = "Restaurant not found"),
    ),
)]
pub(crate) async fn handler(
    restaurant: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<RestaurantReviewResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let reviews = state
        .app
        .reviews
        .list_restaurant_reviews(RestaurantUuid::from_uuid(restaurant.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(
        reviews
            .into_iter()
            .map(RestaurantReviewResponse::from)
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use miam_app::domain::reviews::{
        MockReviewsService, ReviewsServiceError,
        records::{ReviewRating, ReviewWithAuthor, UNKNOWN_AUTHOR_NAME},
    };

    use crate::test_helpers::{make_review, reviews_service};

    use super::*;

    fn make_service(reviews: MockReviewsService) -> Service {
        reviews_service(
            reviews,
            Router::with_path("reviews/restaurant/{restaurant}/reviews").get(handler),
        )
    }

    #[tokio::test]
    async fn test_list_reviews_names_authors() -> TestResult {
        let restaurant = RestaurantUuid::new();

        let entries = vec![
            ReviewWithAuthor {
                review: make_review(ReviewRating::try_from(5_i64)?),
                author_name: Some("Ada".to_string()),
            },
            ReviewWithAuthor {
                review: make_review(ReviewRating::try_from(3_i64)?),
                author_name: None,
            },
        ];

        let mut reviews = MockReviewsService::new();

        reviews
            .expect_list_restaurant_reviews()
            .once()
            .withf(move |r| *r == restaurant)
            .return_once(move |_| Ok(entries));

        let mut res = TestClient::get(format!(
            "http://example.com/reviews/restaurant/{restaurant}/reviews"
        ))
        .send(&make_service(reviews))
        .await;

        let body: Vec<RestaurantReviewResponse> = res.take_json().await?;
        let names: Vec<&str> = body.iter().map(|entry| entry.user_name.as_str()).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(names, ["Ada", UNKNOWN_AUTHOR_NAME]);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_reviews_without_reviews_returns_empty_200() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_list_restaurant_reviews()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let mut res = TestClient::get(format!(
            "http://example.com/reviews/restaurant/{}/reviews",
            RestaurantUuid::new()
        ))
        .send(&make_service(reviews))
        .await;

        let body: Vec<RestaurantReviewResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.is_empty(), "expected no reviews");

        Ok(())
    }

    #[tokio::test]
    async fn test_list_reviews_unknown_restaurant_returns_404() -> TestResult {
        let mut reviews = MockReviewsService::new();

        reviews
            .expect_list_restaurant_reviews()
            .once()
            .return_once(|_| Err(ReviewsServiceError::RestaurantNotFound));

        let res = TestClient::get(format!(
            "http://example.com/reviews/restaurant/{}/reviews",
            RestaurantUuid::new()
        ))
        .send(&make_service(reviews))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
