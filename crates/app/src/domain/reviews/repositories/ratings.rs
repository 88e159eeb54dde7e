//! Restaurant Ratings Repository
//!
//! The aggregate is only ever changed by a single `UPDATE` so concurrent
//! reviews of one restaurant cannot lose each other's contribution.

use sqlx::{FromRow, Postgres, Transaction, postgres::PgRow, query_as};

use crate::{
    amounts::try_get_amount,
    domain::{
        restaurants::records::{RatingAggregate, RestaurantUuid},
        reviews::records::ReviewRating,
    },
};

const ADD_RATING_SQL: &str = include_str!("../sql/add_rating.sql");
const RETRACT_RATING_SQL: &str = include_str!("../sql/retract_rating.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRatingsRepository;

impl PgRatingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn add_rating(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        restaurant: RestaurantUuid,
        rating: ReviewRating,
    ) -> Result<RatingAggregate, sqlx::Error> {
        query_as::<Postgres, RatingAggregate>(ADD_RATING_SQL)
            .bind(restaurant.into_uuid())
            .bind(i64::from(rating.get()))
            .fetch_one(&mut **tx)
            .await
    }

    /// Removes one rating from the aggregate.
    ///
    /// Returns `RowNotFound` if the aggregate does not contain the rating.
    pub(crate) async fn retract_rating(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        restaurant: RestaurantUuid,
        rating: ReviewRating,
    ) -> Result<RatingAggregate, sqlx::Error> {
        query_as::<Postgres, RatingAggregate>(RETRACT_RATING_SQL)
            .bind(restaurant.into_uuid())
            .bind(i64::from(rating.get()))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for RatingAggregate {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            sum: try_get_amount(row, "rating_sum")?,
            count: try_get_amount(row, "rating_count")?,
        })
    }
}
