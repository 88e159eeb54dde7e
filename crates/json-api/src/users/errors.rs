//! User Errors

use tracing::error;

use miam_app::domain::users::UsersServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: UsersServiceError) -> ApiError {
    match error {
        UsersServiceError::AlreadyExists => ApiError::conflict("Email is already registered"),
        UsersServiceError::NotFound => ApiError::not_found("User not found"),
        UsersServiceError::MissingRequiredData | UsersServiceError::InvalidData => {
            ApiError::invalid_argument("Name and email are required")
        }
        UsersServiceError::Sql(source) => {
            error!("user storage failure: {source}");

            ApiError::internal()
        }
    }
}
