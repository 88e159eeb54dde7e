//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    amounts::{amount_to_i64, try_get_amount},
    domain::{
        carts::{
            pricing::CartTotals,
            records::{CartRecord, CartStatus, CartUuid},
        },
        users::records::UserUuid,
    },
};

const ENSURE_OPEN_CART_SQL: &str = include_str!("../sql/ensure_open_cart.sql");
const LOCK_OPEN_CART_SQL: &str = include_str!("../sql/lock_open_cart.sql");
const GET_OPEN_CART_SQL: &str = include_str!("../sql/get_open_cart.sql");
const LOCK_CART_SQL: &str = include_str!("../sql/lock_cart.sql");
const UPDATE_CART_TOTALS_SQL: &str = include_str!("../sql/update_cart_totals.sql");
const CLOSE_CART_SQL: &str = include_str!("../sql/close_cart.sql");
const CART_EXISTS_SQL: &str = include_str!("../sql/cart_exists.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Inserts an empty open cart for the user unless one is already open.
    ///
    /// Inserts nothing when the user does not exist.
    pub(crate) async fn ensure_open_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(ENSURE_OPEN_CART_SQL)
            .bind(cart.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Locks the user's open cart for the rest of the transaction.
    pub(crate) async fn lock_open_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(LOCK_OPEN_CART_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_open_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(GET_OPEN_CART_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(LOCK_CART_SQL)
            .bind(cart.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn cart_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<Postgres, bool>(CART_EXISTS_SQL)
            .bind(cart.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        totals: CartTotals,
    ) -> Result<CartRecord, sqlx::Error> {
        query_as::<Postgres, CartRecord>(UPDATE_CART_TOTALS_SQL)
            .bind(cart.into_uuid())
            .bind(amount_to_i64(totals.subtotal, "subtotal")?)
            .bind(amount_to_i64(totals.delivery_fee, "delivery_fee")?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Flips an open cart to closed. Returns `0` when the cart was not open.
    pub(crate) async fn close_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLOSE_CART_SQL)
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<CartStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            status,
            subtotal: try_get_amount(row, "subtotal")?,
            delivery_fee: try_get_amount(row, "delivery_fee")?,
            lines: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
