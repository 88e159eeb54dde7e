//! Notification Data

use crate::domain::{
    notifications::records::NotificationUuid, orders::records::OrderUuid,
    users::records::UserUuid,
};

/// New Notification Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub uuid: NotificationUuid,
    pub text: String,
    pub order_uuid: OrderUuid,
    pub user_uuid: UserUuid,
}
