//! Delete Review Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use miam_app::domain::reviews::records::ReviewUuid;

use crate::{
    errors::ApiError,
    extensions::*,
    reviews::{errors::into_api_error, responses::ReviewChangedResponse},
    state::State,
};

/// Delete Review Handler
///
/// Deletes a review and takes its rating back out of the restaurant's
/// aggregate.
#[endpoint(
    tags("reviews"),
    summary = "Delete Review",
    responses(
        (status_code = StatusCode::OK, description = "Review deleted and restaurant rating updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Review not found"),
    ),
)]
pub(crate) async fn handler(
    review: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ReviewChangedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let reviewed = state
        .app
        .reviews
        .delete_review(ReviewUuid::from_uuid(review.into_inner()))
        .await
        .map_err(into_api_error)?;

    tracing::info!(
        review_uuid = %reviewed.review.uuid,
        restaurant_uuid = %reviewed.review.restaurant_uuid,
        rating_count = reviewed.rating.count,
        "retracted review"
    );

    Ok(Json(ReviewChangedResponse::new(
        "Review deleted and restaurant rating updated",
        reviewed,
    )))
}
