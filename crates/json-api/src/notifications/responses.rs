//! Notification Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use miam_app::domain::notifications::records::NotificationRecord;

/// Notification Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NotificationResponse {
    pub uuid: Uuid,
    pub text: String,
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub created_at: String,
}

impl From<NotificationRecord> for NotificationResponse {
    fn from(notification: NotificationRecord) -> Self {
        Self {
            uuid: notification.uuid.into_uuid(),
            text: notification.text,
            order_id: notification.order_uuid.into_uuid(),
            user_id: notification.user_uuid.into_uuid(),
            created_at: notification.created_at.to_string(),
        }
    }
}
