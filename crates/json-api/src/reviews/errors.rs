//! Review Errors

use tracing::error;

use miam_app::domain::reviews::ReviewsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: ReviewsServiceError) -> ApiError {
    match error {
        ReviewsServiceError::NotFound => ApiError::not_found("Review not found"),
        ReviewsServiceError::OrderNotFound => ApiError::not_found("Order not found"),
        ReviewsServiceError::RestaurantNotFound => ApiError::not_found("Restaurant not found"),
        ReviewsServiceError::PermissionDenied => {
            ApiError::permission_denied("Unauthorized to review this order")
        }
        ReviewsServiceError::AlreadyReviewed => {
            ApiError::conflict("Order has already been reviewed")
        }
        ReviewsServiceError::InvalidData => {
            error!("review or rating data is inconsistent");

            ApiError::internal()
        }
        ReviewsServiceError::Sql(source) => {
            error!("review storage failure: {source}");

            ApiError::internal()
        }
    }
}
