//! Notifications service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        notifications::{
            data::NewNotification, errors::NotificationsServiceError,
            records::NotificationRecord, repository::PgNotificationsRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgNotificationsService {
    db: Db,
    repository: PgNotificationsRepository,
}

impl PgNotificationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgNotificationsRepository::new(),
        }
    }
}

#[async_trait]
impl NotificationsService for PgNotificationsService {
    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> Result<NotificationRecord, NotificationsServiceError> {
        if notification.text.trim().is_empty() {
            return Err(NotificationsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_notification(&mut tx, notification)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_notifications(
        &self,
        user: UserUuid,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let notifications = self
            .repository
            .list_user_notifications(&mut tx, user)
            .await?;

        tx.commit().await?;

        Ok(notifications)
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// Appends a notification about an order.
    async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> Result<NotificationRecord, NotificationsServiceError>;

    /// A user's notifications, newest first.
    async fn list_notifications(
        &self,
        user: UserUuid,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError>;
}
