//! Review Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use miam_app::domain::{
    restaurants::records::{RatingAggregate, RestaurantUuid},
    reviews::records::{ReviewRecord, ReviewWithAuthor, ReviewedRestaurant},
};

/// Review Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewResponse {
    pub uuid: Uuid,
    pub user_id: Uuid,
    pub order_id: Uuid,
    pub restaurant_id: Uuid,

    /// Stars, 1 to 5
    pub rating: u8,

    pub comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ReviewRecord> for ReviewResponse {
    fn from(review: ReviewRecord) -> Self {
        Self {
            uuid: review.uuid.into_uuid(),
            user_id: review.user_uuid.into_uuid(),
            order_id: review.order_uuid.into_uuid(),
            restaurant_id: review.restaurant_uuid.into_uuid(),
            rating: review.rating.get(),
            comment: review.comment,
            created_at: review.created_at.to_string(),
            updated_at: review.updated_at.to_string(),
        }
    }
}

/// Restaurant Rating Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RestaurantRatingResponse {
    pub uuid: Uuid,

    /// Mean of all current ratings, 0 without reviews
    pub average_rating: f64,

    pub total_reviews: u64,
}

impl RestaurantRatingResponse {
    fn new(restaurant: RestaurantUuid, rating: RatingAggregate) -> Self {
        Self {
            uuid: restaurant.into_uuid(),
            average_rating: rating.average(),
            total_reviews: rating.count,
        }
    }
}

/// Review Changed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewChangedResponse {
    pub message: String,
    pub review: ReviewResponse,

    /// The reviewed restaurant's rating after the change
    pub restaurant: RestaurantRatingResponse,
}

impl ReviewChangedResponse {
    pub(crate) fn new(message: &str, reviewed: ReviewedRestaurant) -> Self {
        let restaurant =
            RestaurantRatingResponse::new(reviewed.review.restaurant_uuid, reviewed.rating);

        Self {
            message: message.to_string(),
            review: reviewed.review.into(),
            restaurant,
        }
    }
}

/// Restaurant Review Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RestaurantReviewResponse {
    pub review: ReviewResponse,

    /// Reviewer's current name, or "Unknown" once the account is gone
    pub user_name: String,
}

impl From<ReviewWithAuthor> for RestaurantReviewResponse {
    fn from(entry: ReviewWithAuthor) -> Self {
        let user_name = entry.display_author().to_string();

        Self {
            review: entry.review.into(),
            user_name,
        }
    }
}
