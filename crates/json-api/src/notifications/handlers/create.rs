//! Create Notification Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use miam_app::domain::{
    notifications::{data::NewNotification, records::NotificationUuid},
    orders::records::OrderUuid,
    users::records::UserUuid,
};

use crate::{
    errors::ApiError,
    extensions::*,
    notifications::{errors::into_api_error, responses::NotificationResponse},
    state::State,
};

/// Create Notification Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateNotificationRequest {
    pub text: String,
    pub order_id: Uuid,
    pub user_id: Uuid,
}

/// Create Notification Handler
#[endpoint(
    tags("notifications"),
    summary = "Create Notification",
    responses(
        (status_code = StatusCode::CREATED, description = "Notification stored"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateNotificationRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<NotificationResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let notification = state
        .app
        .notifications
        .create_notification(NewNotification {
            uuid: NotificationUuid::new(),
            text: request.text,
            order_uuid: OrderUuid::from_uuid(request.order_id),
            user_uuid: UserUuid::from_uuid(request.user_id),
        })
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(notification.into()))
}
