//! Notifications Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    notifications::{
        data::NewNotification,
        records::{NotificationRecord, NotificationUuid},
    },
    orders::records::OrderUuid,
    users::records::UserUuid,
};

const CREATE_NOTIFICATION_SQL: &str = include_str!("sql/create_notification.sql");
const LIST_USER_NOTIFICATIONS_SQL: &str = include_str!("sql/list_user_notifications.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgNotificationsRepository;

impl PgNotificationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_notification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        notification: NewNotification,
    ) -> Result<NotificationRecord, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(CREATE_NOTIFICATION_SQL)
            .bind(notification.uuid.into_uuid())
            .bind(notification.text)
            .bind(notification.order_uuid.into_uuid())
            .bind(notification.user_uuid.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_notifications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<NotificationRecord>, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(LIST_USER_NOTIFICATIONS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for NotificationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: NotificationUuid::from_uuid(row.try_get("uuid")?),
            text: row.try_get("text")?,
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
