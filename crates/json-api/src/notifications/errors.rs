//! Notification Errors

use tracing::error;

use miam_app::domain::notifications::NotificationsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: NotificationsServiceError) -> ApiError {
    match error {
        NotificationsServiceError::AlreadyExists => {
            ApiError::conflict("Notification already exists")
        }
        NotificationsServiceError::ReferenceNotFound => {
            ApiError::not_found("Order or user not found")
        }
        NotificationsServiceError::MissingRequiredData => {
            ApiError::invalid_argument("Notification text is required")
        }
        NotificationsServiceError::InvalidData => {
            ApiError::invalid_argument("Invalid notification")
        }
        NotificationsServiceError::Sql(source) => {
            error!("notification storage failure: {source}");

            ApiError::internal()
        }
    }
}
