//! Review Data

use crate::domain::{
    orders::records::OrderUuid,
    reviews::records::{ReviewRating, ReviewUuid},
    users::records::UserUuid,
};

/// New Review Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub uuid: ReviewUuid,
    pub user_uuid: UserUuid,
    pub order_uuid: OrderUuid,
    pub rating: ReviewRating,
    pub comment: Option<String>,
}
