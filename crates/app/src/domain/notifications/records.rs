//! Notification Records

use jiff::Timestamp;

use crate::{
    domain::{orders::records::OrderUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Notification UUID
pub type NotificationUuid = TypedUuid<NotificationRecord>;

/// Notification Record
#[derive(Debug, Clone)]
pub struct NotificationRecord {
    pub uuid: NotificationUuid,
    pub text: String,
    pub order_uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub created_at: Timestamp,
}
