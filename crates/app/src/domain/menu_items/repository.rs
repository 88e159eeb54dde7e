//! Menu Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    amounts::{amount_to_i64, try_get_amount},
    domain::{
        menu_items::{
            data::{MenuItemUpdate, NewMenuItem},
            records::{MenuItemCategory, MenuItemRecord, MenuItemUuid},
        },
        restaurants::records::RestaurantUuid,
    },
};

const CREATE_MENU_ITEM_SQL: &str = include_str!("sql/create_menu_item.sql");
const GET_MENU_ITEM_SQL: &str = include_str!("sql/get_menu_item.sql");
const LIST_RESTAURANT_MENU_ITEMS_SQL: &str = include_str!("sql/list_restaurant_menu_items.sql");
const UPDATE_MENU_ITEM_SQL: &str = include_str!("sql/update_menu_item.sql");
const DELETE_MENU_ITEM_SQL: &str = include_str!("sql/delete_menu_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgMenuItemsRepository;

impl PgMenuItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Inserts the item under a live restaurant.
    ///
    /// Returns `RowNotFound` when the restaurant is missing or deleted.
    pub(crate) async fn create_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: NewMenuItem,
    ) -> Result<MenuItemRecord, sqlx::Error> {
        let price = amount_to_i64(item.price, "price")?;

        query_as::<Postgres, MenuItemRecord>(CREATE_MENU_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(item.restaurant_uuid.into_uuid())
            .bind(item.name)
            .bind(item.description)
            .bind(price)
            .bind(item.category.as_str())
            .bind(item.is_available)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: MenuItemUuid,
    ) -> Result<MenuItemRecord, sqlx::Error> {
        query_as::<Postgres, MenuItemRecord>(GET_MENU_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Live items of one restaurant. The caller checks that the restaurant
    /// itself is live.
    pub(crate) async fn list_restaurant_menu_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        restaurant: RestaurantUuid,
    ) -> Result<Vec<MenuItemRecord>, sqlx::Error> {
        query_as::<Postgres, MenuItemRecord>(LIST_RESTAURANT_MENU_ITEMS_SQL)
            .bind(restaurant.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: MenuItemUuid,
        update: MenuItemUpdate,
    ) -> Result<MenuItemRecord, sqlx::Error> {
        let price = update
            .price
            .map(|price| amount_to_i64(price, "price"))
            .transpose()?;

        query_as::<Postgres, MenuItemRecord>(UPDATE_MENU_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(price)
            .bind(update.is_available)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: MenuItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_MENU_ITEM_SQL)
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for MenuItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let category: String = row.try_get("category")?;
        let category =
            category
                .parse::<MenuItemCategory>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "category".to_string(),
                    source: Box::new(e),
                })?;

        Ok(Self {
            uuid: MenuItemUuid::from_uuid(row.try_get("uuid")?),
            restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: try_get_amount(row, "price")?,
            category,
            is_available: row.try_get("is_available")?,
            rating: row.try_get("rating")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
