//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        menu_items::{MenuItemsService, PgMenuItemsService},
        notifications::{NotificationsService, PgNotificationsService},
        orders::{OrdersService, PgOrdersService},
        restaurants::{PgRestaurantsService, RestaurantsService},
        reviews::{PgReviewsService, ReviewsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub restaurants: Arc<dyn RestaurantsService>,
    pub menu_items: Arc<dyn MenuItemsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub notifications: Arc<dyn NotificationsService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// When `run_migrations` is set, pending schema migrations are applied
    /// before any service is handed out.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(url: &str, run_migrations: bool) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        Ok(Self::from_db(&Db::new(pool)))
    }

    #[must_use]
    pub fn from_db(db: &Db) -> Self {
        Self {
            users: Arc::new(PgUsersService::new(db.clone())),
            restaurants: Arc::new(PgRestaurantsService::new(db.clone())),
            menu_items: Arc::new(PgMenuItemsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            reviews: Arc::new(PgReviewsService::new(db.clone())),
            notifications: Arc::new(PgNotificationsService::new(db.clone())),
        }
    }
}
