//! Review Records

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{
        orders::records::OrderUuid,
        restaurants::records::{RatingAggregate, RestaurantUuid},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Name reported for a reviewer whose account no longer exists.
pub const UNKNOWN_AUTHOR_NAME: &str = "Unknown";

/// Review UUID
pub type ReviewUuid = TypedUuid<ReviewRecord>;

/// Review Record
#[derive(Debug, Clone)]
pub struct ReviewRecord {
    pub uuid: ReviewUuid,
    pub user_uuid: UserUuid,
    pub order_uuid: OrderUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub rating: ReviewRating,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A review together with its author's current name.
#[derive(Debug, Clone)]
pub struct ReviewWithAuthor {
    pub review: ReviewRecord,
    pub author_name: Option<String>,
}

impl ReviewWithAuthor {
    pub fn display_author(&self) -> &str {
        self.author_name.as_deref().unwrap_or(UNKNOWN_AUTHOR_NAME)
    }
}

/// Outcome of a review write: the review and the restaurant's updated aggregate.
#[derive(Debug, Clone)]
pub struct ReviewedRestaurant {
    pub review: ReviewRecord,
    pub rating: RatingAggregate,
}

/// A star rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReviewRating(u8);

impl ReviewRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct InvalidRating(pub i64);

impl TryFrom<i64> for ReviewRating {
    type Error = InvalidRating;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|rating| (Self::MIN..=Self::MAX).contains(rating))
            .map(Self)
            .ok_or(InvalidRating(value))
    }
}
