//! Restaurant Errors

use tracing::error;

use miam_app::domain::restaurants::RestaurantsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: RestaurantsServiceError) -> ApiError {
    match error {
        RestaurantsServiceError::AlreadyExists => ApiError::conflict("Restaurant already exists"),
        RestaurantsServiceError::NotFound => ApiError::not_found("Restaurant not found"),
        RestaurantsServiceError::MissingRequiredData => {
            ApiError::invalid_argument("Restaurant name is required")
        }
        RestaurantsServiceError::InvalidData => {
            ApiError::invalid_argument("Invalid restaurant payload")
        }
        RestaurantsServiceError::Sql(source) => {
            error!("restaurant storage failure: {source}");

            ApiError::internal()
        }
    }
}
