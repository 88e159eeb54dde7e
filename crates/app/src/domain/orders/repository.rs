//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    amounts::{amount_to_i64, try_get_amount, try_get_count},
    domain::{
        carts::records::{CartRecord, CartUuid},
        menu_items::records::MenuItemUuid,
        orders::{
            data::{NewOrder, OrderNotesUpdate},
            records::{
                Coordinates, DeliveryAddress, OrderLineRecord, OrderRecord, OrderStatus, OrderUuid,
            },
        },
        users::records::UserUuid,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const COPY_CART_LINES_SQL: &str = include_str!("sql/copy_cart_lines.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("sql/list_user_orders.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("sql/get_order_lines.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const UPDATE_ORDER_NOTES_SQL: &str = include_str!("sql/update_order_notes.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Inserts the order with the cart's current totals frozen into it.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: NewOrder,
        cart: &CartRecord,
        total_amount: u64,
    ) -> Result<OrderRecord, sqlx::Error> {
        let NewOrder {
            uuid,
            user_uuid,
            cart_uuid,
            delivery_address,
            user_notes,
            delivery_notes,
        } = order;

        let coordinates = delivery_address.coordinates;

        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(uuid.into_uuid())
            .bind(user_uuid.into_uuid())
            .bind(cart_uuid.into_uuid())
            .bind(amount_to_i64(cart.subtotal, "subtotal")?)
            .bind(amount_to_i64(cart.delivery_fee, "delivery_fee")?)
            .bind(amount_to_i64(total_amount, "total_amount")?)
            .bind(delivery_address.street)
            .bind(delivery_address.city)
            .bind(delivery_address.postal_code)
            .bind(coordinates.map(|c| c.latitude))
            .bind(coordinates.map(|c| c.longitude))
            .bind(user_notes)
            .bind(delivery_notes)
            .fetch_one(&mut **tx)
            .await
    }

    /// Snapshots the cart's lines onto the order. Returns the number of lines copied.
    pub(crate) async fn copy_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(COPY_CART_LINES_SQL)
            .bind(order.into_uuid())
            .bind(cart.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let mut orders = query_as::<Postgres, OrderRecord>(LIST_USER_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        self.attach_lines(tx, &mut orders).await?;

        Ok(orders)
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        let mut order = query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await?;

        self.attach_lines(tx, std::slice::from_mut(&mut order))
            .await?;

        Ok(order)
    }

    pub(crate) async fn update_notes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        notes: OrderNotesUpdate,
    ) -> Result<OrderRecord, sqlx::Error> {
        let mut order = query_as::<Postgres, OrderRecord>(UPDATE_ORDER_NOTES_SQL)
            .bind(order.into_uuid())
            .bind(notes.user_notes)
            .bind(notes.delivery_notes)
            .fetch_one(&mut **tx)
            .await?;

        self.attach_lines(tx, std::slice::from_mut(&mut order))
            .await?;

        Ok(order)
    }

    async fn attach_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [OrderRecord],
    ) -> Result<(), sqlx::Error> {
        if orders.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let rows = query_as::<Postgres, OrderLineRow>(GET_ORDER_LINES_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut lines: FxHashMap<OrderUuid, Vec<OrderLineRecord>> = FxHashMap::default();

        for row in rows {
            lines.entry(row.order_uuid).or_default().push(row.line);
        }

        for order in orders {
            order.lines = lines.remove(&order.uuid).unwrap_or_default();
        }

        Ok(())
    }
}

struct OrderLineRow {
    order_uuid: OrderUuid,
    line: OrderLineRecord,
}

impl<'r> FromRow<'r, PgRow> for OrderLineRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            line: OrderLineRecord {
                menu_item_uuid: MenuItemUuid::from_uuid(row.try_get("menu_item_uuid")?),
                quantity: try_get_count(row, "quantity")?,
                unit_price: try_get_amount(row, "unit_price")?,
            },
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        let latitude: Option<f64> = row.try_get("latitude")?;
        let longitude: Option<f64> = row.try_get("longitude")?;

        let coordinates = latitude
            .zip(longitude)
            .map(|(latitude, longitude)| Coordinates {
                latitude,
                longitude,
            });

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            subtotal: try_get_amount(row, "subtotal")?,
            delivery_fee: try_get_amount(row, "delivery_fee")?,
            total_amount: try_get_amount(row, "total_amount")?,
            delivery_address: DeliveryAddress {
                street: row.try_get("street")?,
                city: row.try_get("city")?,
                postal_code: row.try_get("postal_code")?,
                coordinates,
            },
            status,
            user_notes: row.try_get("user_notes")?,
            delivery_notes: row.try_get("delivery_notes")?,
            lines: Vec::new(),
            placed_at: row.try_get::<SqlxTimestamp, _>("placed_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
