//! Create Review Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use miam_app::domain::{
    orders::records::OrderUuid,
    reviews::{
        data::NewReview,
        records::{ReviewRating, ReviewUuid},
    },
    users::records::UserUuid,
};

use crate::{
    errors::ApiError,
    extensions::*,
    reviews::{errors::into_api_error, responses::ReviewChangedResponse},
    state::State,
};

/// Create Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateReviewRequest {
    /// The reviewer, who must have placed the order
    pub user_id: Uuid,

    pub order_id: Uuid,

    /// Stars, 1 to 5
    pub rating: i64,

    #[serde(default)]
    pub comment: Option<String>,
}

/// Create Review Handler
///
/// Reviews an order and folds the rating into the restaurant's aggregate.
#[endpoint(
    tags("reviews"),
    summary = "Create Review",
    responses(
        (status_code = StatusCode::CREATED, description = "Review added and restaurant rating updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Rating outside 1 to 5"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Order or restaurant not found"),
        (status_code = StatusCode::CONFLICT, description = "Order already reviewed"),
    ),
)]
#[tracing::instrument(
    name = "reviews.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty,
        rating = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewChangedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(request.user_id));
    span.record("order_uuid", tracing::field::display(request.order_id));
    span.record("rating", request.rating);

    let rating = ReviewRating::try_from(request.rating)
        .map_err(|error| ApiError::invalid_argument(error.to_string()))?;

    let reviewed = state
        .app
        .reviews
        .create_review(NewReview {
            uuid: ReviewUuid::new(),
            user_uuid: UserUuid::from_uuid(request.user_id),
            order_uuid: OrderUuid::from_uuid(request.order_id),
            rating,
            comment: request.comment,
        })
        .await
        .map_err(into_api_error)?;

    tracing::info!(
        review_uuid = %reviewed.review.uuid,
        restaurant_uuid = %reviewed.review.restaurant_uuid,
        rating_count = reviewed.rating.count,
        "recorded review"
    );

    res.status_code(StatusCode::CREATED);

    Ok(Json(ReviewChangedResponse::new(
        "Review added and restaurant rating updated",
        reviewed,
    )))
}
