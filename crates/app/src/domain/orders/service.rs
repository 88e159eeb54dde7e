//! Orders service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            records::CartStatus,
            repositories::{PgCartLinesRepository, PgCartsRepository},
        },
        orders::{
            data::{NewOrder, OrderNotesUpdate},
            errors::OrdersServiceError,
            records::{OrderLineRecord, OrderRecord, OrderStatus, OrderUuid},
            repository::PgOrdersRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    carts_repository: PgCartsRepository,
    cart_lines_repository: PgCartLinesRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            carts_repository: PgCartsRepository::new(),
            cart_lines_repository: PgCartLinesRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        order.delivery_address.validate()?;

        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .lock_cart(&mut tx, order.cart_uuid)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => OrdersServiceError::CartNotFound,
                other => other.into(),
            })?;

        if cart.user_uuid != order.user_uuid {
            return Err(OrdersServiceError::PermissionDenied);
        }

        if cart.status == CartStatus::Closed {
            return Err(OrdersServiceError::CartClosed);
        }

        let lines = self
            .cart_lines_repository
            .get_lines(&mut tx, cart.uuid)
            .await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let total_amount = cart
            .subtotal
            .checked_add(cart.delivery_fee)
            .ok_or(OrdersServiceError::InvalidData)?;

        let mut created = self
            .repository
            .create_order(&mut tx, order, &cart, total_amount)
            .await?;

        self.repository
            .copy_cart_lines(&mut tx, created.uuid, cart.uuid)
            .await?;

        let closed = self.carts_repository.close_cart(&mut tx, cart.uuid).await?;

        if closed == 0 {
            return Err(OrdersServiceError::CartClosed);
        }

        tx.commit().await?;

        tracing::info!(
            order_uuid = %created.uuid,
            cart_uuid = %cart.uuid,
            user_uuid = %created.user_uuid,
            total_amount,
            "order placed"
        );

        created.lines = lines
            .iter()
            .map(|line| OrderLineRecord {
                menu_item_uuid: line.menu_item_uuid,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();
        created.lines.sort_by_key(|line| line.menu_item_uuid);

        Ok(created)
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_user_orders(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_status(&mut tx, order, status).await?;

        tx.commit().await?;

        tracing::info!(order_uuid = %order, status = %status, "order status changed");

        Ok(updated)
    }

    async fn update_notes(
        &self,
        order: OrderUuid,
        notes: OrderNotesUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_notes(&mut tx, order, notes).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Checks out a cart.
    ///
    /// The order, its line snapshot and the closing of the cart are written in
    /// one transaction; either all of them happen or none do.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// All orders placed by a user, newest first. Empty when there are none.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Moves an order to another status.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Replaces the supplied notes, trimmed.
    async fn update_notes(
        &self,
        order: OrderUuid,
        notes: OrderNotesUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
