//! Restaurants Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    amounts::{amount_to_i64, try_get_amount},
    domain::restaurants::{
        data::NewRestaurant,
        records::{GeoPoint, RatingAggregate, RestaurantRecord, RestaurantUuid},
    },
};

const CREATE_RESTAURANT_SQL: &str = include_str!("sql/create_restaurant.sql");
const GET_RESTAURANT_SQL: &str = include_str!("sql/get_restaurant.sql");
const LIST_RESTAURANTS_SQL: &str = include_str!("sql/list_restaurants.sql");
const DELETE_RESTAURANT_SQL: &str = include_str!("sql/delete_restaurant.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRestaurantsRepository;

impl PgRestaurantsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_restaurant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        restaurant: NewRestaurant,
    ) -> Result<RestaurantRecord, sqlx::Error> {
        let delivery_fee = amount_to_i64(restaurant.delivery_fee, "delivery_fee")?;

        query_as::<Postgres, RestaurantRecord>(CREATE_RESTAURANT_SQL)
            .bind(restaurant.uuid.into_uuid())
            .bind(restaurant.name)
            .bind(restaurant.description)
            .bind(delivery_fee)
            .bind(restaurant.location.longitude)
            .bind(restaurant.location.latitude)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_restaurant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        restaurant: RestaurantUuid,
    ) -> Result<RestaurantRecord, sqlx::Error> {
        query_as::<Postgres, RestaurantRecord>(GET_RESTAURANT_SQL)
            .bind(restaurant.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_restaurants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<RestaurantRecord>, sqlx::Error> {
        query_as::<Postgres, RestaurantRecord>(LIST_RESTAURANTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_restaurant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        restaurant: RestaurantUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_RESTAURANT_SQL)
            .bind(restaurant.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for RestaurantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: RestaurantUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            delivery_fee: try_get_amount(row, "delivery_fee")?,
            location: GeoPoint {
                longitude: row.try_get("longitude")?,
                latitude: row.try_get("latitude")?,
            },
            rating: RatingAggregate {
                sum: try_get_amount(row, "rating_sum")?,
                count: try_get_amount(row, "rating_count")?,
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
