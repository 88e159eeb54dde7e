//! Cart Lines Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    amounts::{count_to_i32, try_get_amount, try_get_count},
    domain::{
        carts::{
            pricing::PricedLine,
            records::{CartLineRecord, CartUuid},
        },
        menu_items::records::MenuItemUuid,
        restaurants::records::RestaurantUuid,
    },
};

const GET_PURCHASABLE_ITEM_SQL: &str = include_str!("../sql/get_purchasable_item.sql");
const ADD_CART_LINE_SQL: &str = include_str!("../sql/add_cart_line.sql");
const SET_CART_LINE_QUANTITY_SQL: &str = include_str!("../sql/set_cart_line_quantity.sql");
const DELETE_CART_LINE_SQL: &str = include_str!("../sql/delete_cart_line.sql");
const DELETE_STALE_CART_LINES_SQL: &str = include_str!("../sql/delete_stale_cart_lines.sql");
const GET_PRICED_CART_LINES_SQL: &str = include_str!("../sql/get_priced_cart_lines.sql");
const REFRESH_CART_LINE_PRICES_SQL: &str = include_str!("../sql/refresh_cart_line_prices.sql");
const GET_CART_LINES_SQL: &str = include_str!("../sql/get_cart_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartLinesRepository;

impl PgCartLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Availability of a live menu item. `RowNotFound` when the item or its
    /// restaurant is missing or deleted.
    pub(crate) async fn get_item_availability(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: MenuItemUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(GET_PURCHASABLE_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Appends a line, or increments the quantity of an existing one.
    pub(crate) async fn add_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: MenuItemUuid,
        quantity: u32,
    ) -> Result<(), sqlx::Error> {
        query(ADD_CART_LINE_SQL)
            .bind(cart.into_uuid())
            .bind(item.into_uuid())
            .bind(count_to_i32(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn set_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: MenuItemUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_CART_LINE_QUANTITY_SQL)
            .bind(cart.into_uuid())
            .bind(item.into_uuid())
            .bind(count_to_i32(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        item: MenuItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_LINE_SQL)
            .bind(cart.into_uuid())
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Drops lines whose menu item or restaurant has been deleted.
    pub(crate) async fn delete_stale_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_STALE_CART_LINES_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Lines joined with current catalog prices and restaurant fees.
    pub(crate) async fn get_priced_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<PricedLine>, sqlx::Error> {
        query_as::<Postgres, PricedLine>(GET_PRICED_CART_LINES_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Copies current catalog prices onto the lines.
    pub(crate) async fn refresh_prices(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<(), sqlx::Error> {
        query(REFRESH_CART_LINE_PRICES_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(GET_CART_LINES_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PricedLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            menu_item_uuid: MenuItemUuid::from_uuid(row.try_get("menu_item_uuid")?),
            restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
            quantity: try_get_count(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            delivery_fee: try_get_amount(row, "delivery_fee")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            menu_item_uuid: MenuItemUuid::from_uuid(row.try_get("menu_item_uuid")?),
            name: row.try_get("name")?,
            restaurant_uuid: row
                .try_get::<Option<Uuid>, _>("restaurant_uuid")?
                .map(RestaurantUuid::from_uuid),
            quantity: try_get_count(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
