//! Reviews service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        orders::records::OrderUuid,
        restaurants::{
            records::RestaurantUuid,
            repository::PgRestaurantsRepository,
        },
        reviews::{
            data::NewReview,
            errors::ReviewsServiceError,
            records::{ReviewUuid, ReviewWithAuthor, ReviewedRestaurant},
            repositories::{PgRatingsRepository, PgReviewsRepository},
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    reviews_repository: PgReviewsRepository,
    ratings_repository: PgRatingsRepository,
    restaurants_repository: PgRestaurantsRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            reviews_repository: PgReviewsRepository::new(),
            ratings_repository: PgRatingsRepository::new(),
            restaurants_repository: PgRestaurantsRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    async fn create_review(
        &self,
        review: NewReview,
    ) -> Result<ReviewedRestaurant, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let owner = self
            .reviews_repository
            .get_order_owner(&mut tx, review.order_uuid)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => ReviewsServiceError::OrderNotFound,
                other => other.into(),
            })?;

        if owner.user_uuid != review.user_uuid {
            return Err(ReviewsServiceError::PermissionDenied);
        }

        let restaurant = self
            .reviews_repository
            .resolve_cart_restaurant(&mut tx, owner.cart_uuid)
            .await?
            .ok_or(ReviewsServiceError::RestaurantNotFound)?;

        let review = self
            .reviews_repository
            .create_review(&mut tx, review, restaurant)
            .await?;

        let rating = self
            .ratings_repository
            .add_rating(&mut tx, restaurant, review.rating)
            .await?;

        tx.commit().await?;

        tracing::info!(
            review_uuid = %review.uuid,
            restaurant_uuid = %restaurant,
            rating_count = rating.count,
            "review added"
        );

        Ok(ReviewedRestaurant { review, rating })
    }

    async fn review_exists(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<bool, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let exists = self
            .reviews_repository
            .review_exists(&mut tx, user, order)
            .await?;

        tx.commit().await?;

        Ok(exists)
    }

    async fn delete_review(
        &self,
        review: ReviewUuid,
    ) -> Result<ReviewedRestaurant, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let review = self.reviews_repository.delete_review(&mut tx, review).await?;

        let rating = self
            .ratings_repository
            .retract_rating(&mut tx, review.restaurant_uuid, review.rating)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => {
                    tracing::error!(
                        review_uuid = %review.uuid,
                        restaurant_uuid = %review.restaurant_uuid,
                        "rating aggregate does not contain the deleted review"
                    );

                    ReviewsServiceError::InvalidData
                }
                other => other.into(),
            })?;

        tx.commit().await?;

        tracing::info!(
            review_uuid = %review.uuid,
            restaurant_uuid = %review.restaurant_uuid,
            rating_count = rating.count,
            "review deleted"
        );

        Ok(ReviewedRestaurant { review, rating })
    }

    async fn list_restaurant_reviews(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Vec<ReviewWithAuthor>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        self.restaurants_repository
            .get_restaurant(&mut tx, restaurant)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => ReviewsServiceError::RestaurantNotFound,
                other => other.into(),
            })?;

        let reviews = self
            .reviews_repository
            .list_restaurant_reviews(&mut tx, restaurant)
            .await?;

        tx.commit().await?;

        Ok(reviews)
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Reviews an order and folds the rating into its restaurant's aggregate.
    async fn create_review(
        &self,
        review: NewReview,
    ) -> Result<ReviewedRestaurant, ReviewsServiceError>;

    /// Whether the user has already reviewed the order.
    async fn review_exists(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<bool, ReviewsServiceError>;

    /// Deletes a review and removes its rating from the aggregate.
    async fn delete_review(
        &self,
        review: ReviewUuid,
    ) -> Result<ReviewedRestaurant, ReviewsServiceError>;

    /// Reviews of a live restaurant, newest first.
    async fn list_restaurant_reviews(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Vec<ReviewWithAuthor>, ReviewsServiceError>;
}
