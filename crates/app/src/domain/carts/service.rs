//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            pricing::compute_totals,
            records::{CartLineRecord, CartRecord, CartUuid},
            repositories::{PgCartLinesRepository, PgCartsRepository},
        },
        menu_items::records::MenuItemUuid,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    lines_repository: PgCartLinesRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            lines_repository: PgCartLinesRepository::new(),
        }
    }

    /// Returns the user's open cart, creating it first if needed, locked for
    /// the rest of the transaction.
    ///
    /// A concurrent checkout can close the cart between the insert and the
    /// lock. That case gets one more attempt before the user is treated as
    /// missing.
    async fn lock_or_create_open_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        if let Some(cart) = self.try_lock_or_create_open_cart(tx, user).await? {
            return Ok(cart);
        }

        tracing::debug!(user_uuid = %user, "open cart closed concurrently, retrying");

        self.try_lock_or_create_open_cart(tx, user)
            .await?
            .ok_or(CartsServiceError::UserNotFound)
    }

    async fn try_lock_or_create_open_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<CartRecord>, CartsServiceError> {
        let created = self
            .carts_repository
            .ensure_open_cart(tx, CartUuid::new(), user)
            .await?;

        let cart = match self.carts_repository.lock_open_cart(tx, user).await {
            Ok(cart) => cart,
            Err(sqlx::Error::RowNotFound) => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        if created > 0 {
            tracing::debug!(cart_uuid = %cart.uuid, user_uuid = %user, "opened cart");
        }

        Ok(Some(cart))
    }

    /// Re-derives the cart totals from the current catalog.
    ///
    /// Lines whose menu item or restaurant has been deleted are dropped, the
    /// remaining lines pick up the current price, and the subtotal and
    /// delivery fee are written back.
    async fn recompute(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let dropped = self.lines_repository.delete_stale_lines(tx, cart).await?;

        if dropped > 0 {
            tracing::info!(cart_uuid = %cart, dropped, "dropped stale cart lines");
        }

        let priced = self.lines_repository.get_priced_lines(tx, cart).await?;
        let totals = compute_totals(&priced)?;

        self.lines_repository.refresh_prices(tx, cart).await?;

        let mut updated = self
            .carts_repository
            .update_totals(tx, cart, totals)
            .await?;

        updated.lines = self.lines_repository.get_lines(tx, cart).await?;

        Ok(updated)
    }
}

fn not_found_as(error: sqlx::Error, not_found: CartsServiceError) -> CartsServiceError {
    match error {
        sqlx::Error::RowNotFound => not_found,
        other => other.into(),
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_or_create_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self.lock_or_create_open_cart(&mut tx, user).await?;

        cart.lines = self.lines_repository.get_lines(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self.carts_repository.get_open_cart(&mut tx, user).await?;

        cart.lines = self.lines_repository.get_lines(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: MenuItemUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let cart = self.lock_or_create_open_cart(&mut tx, user).await?;

        let is_available = self
            .lines_repository
            .get_item_availability(&mut tx, item)
            .await
            .map_err(|error| not_found_as(error, CartsServiceError::MenuItemNotFound))?;

        if !is_available {
            return Err(CartsServiceError::ItemUnavailable);
        }

        self.lines_repository
            .add_line(&mut tx, cart.uuid, item, quantity)
            .await?;

        let cart = self.recompute(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        item: MenuItemUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.lock_open_cart(&mut tx, user).await?;

        let rows_affected = self
            .lines_repository
            .delete_line(&mut tx, cart.uuid, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::LineNotFound);
        }

        let cart = self.recompute(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn update_quantity(
        &self,
        user: UserUuid,
        item: MenuItemUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.lock_open_cart(&mut tx, user).await?;

        let rows_affected = self
            .lines_repository
            .set_quantity(&mut tx, cart.uuid, item, quantity)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::LineNotFound);
        }

        let cart = self.recompute(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn list_items(&self, cart: CartUuid) -> Result<Vec<CartLineRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        if !self.carts_repository.cart_exists(&mut tx, cart).await? {
            return Err(CartsServiceError::NotFound);
        }

        let lines = self.lines_repository.get_lines(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(lines)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Returns the user's open cart, creating an empty one when the user has
    /// none (including when every previous cart has been checked out).
    async fn get_or_create_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Retrieve the user's open cart with its lines.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Adds `quantity` units of a menu item to the user's open cart.
    async fn add_item(
        &self,
        user: UserUuid,
        item: MenuItemUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Removes a line from the user's open cart.
    async fn remove_item(
        &self,
        user: UserUuid,
        item: MenuItemUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Replaces the quantity of an existing line.
    async fn update_quantity(
        &self,
        user: UserUuid,
        item: MenuItemUuid,
        quantity: u32,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Lines of any cart, open or closed, with current item names.
    async fn list_items(&self, cart: CartUuid) -> Result<Vec<CartLineRecord>, CartsServiceError>;
}
