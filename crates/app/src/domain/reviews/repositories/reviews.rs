//! Reviews Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    carts::records::CartUuid,
    orders::records::OrderUuid,
    restaurants::records::RestaurantUuid,
    reviews::{
        data::NewReview,
        records::{ReviewRating, ReviewRecord, ReviewUuid, ReviewWithAuthor},
    },
    users::records::UserUuid,
};

const GET_ORDER_OWNER_SQL: &str = include_str!("../sql/get_order_owner.sql");
const RESOLVE_ORDER_RESTAURANT_SQL: &str = include_str!("../sql/resolve_order_restaurant.sql");
const CREATE_REVIEW_SQL: &str = include_str!("../sql/create_review.sql");
const DELETE_REVIEW_SQL: &str = include_str!("../sql/delete_review.sql");
const REVIEW_EXISTS_SQL: &str = include_str!("../sql/review_exists.sql");
const LIST_RESTAURANT_REVIEWS_SQL: &str = include_str!("../sql/list_restaurant_reviews.sql");

/// Who placed an order, and from which cart.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OrderOwner {
    pub(crate) user_uuid: UserUuid,
    pub(crate) cart_uuid: CartUuid,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReviewsRepository;

impl PgReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_order_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderOwner, sqlx::Error> {
        query_as::<Postgres, OrderOwner>(GET_ORDER_OWNER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// First live restaurant among the cart's lines.
    pub(crate) async fn resolve_cart_restaurant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Option<RestaurantUuid>, sqlx::Error> {
        let restaurant = query_scalar::<Postgres, Uuid>(RESOLVE_ORDER_RESTAURANT_SQL)
            .bind(cart.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(restaurant.map(RestaurantUuid::from_uuid))
    }

    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: NewReview,
        restaurant: RestaurantUuid,
    ) -> Result<ReviewRecord, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(CREATE_REVIEW_SQL)
            .bind(review.uuid.into_uuid())
            .bind(review.user_uuid.into_uuid())
            .bind(review.order_uuid.into_uuid())
            .bind(restaurant.into_uuid())
            .bind(i16::from(review.rating.get()))
            .bind(review.comment)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
    ) -> Result<ReviewRecord, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(DELETE_REVIEW_SQL)
            .bind(review.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn review_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(REVIEW_EXISTS_SQL)
            .bind(user.into_uuid())
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_restaurant_reviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        restaurant: RestaurantUuid,
    ) -> Result<Vec<ReviewWithAuthor>, sqlx::Error> {
        query_as::<Postgres, ReviewWithAuthor>(LIST_RESTAURANT_REVIEWS_SQL)
            .bind(restaurant.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderOwner {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ReviewRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let rating: i16 = row.try_get("rating")?;
        let rating =
            ReviewRating::try_from(i64::from(rating)).map_err(|e| sqlx::Error::ColumnDecode {
                index: "rating".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: ReviewUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
            rating,
            comment: row.try_get("comment")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ReviewWithAuthor {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            review: ReviewRecord::from_row(row)?,
            author_name: row.try_get("author_name")?,
        })
    }
}
