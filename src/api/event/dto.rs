use serde::{Deserialize, Serialize};

use super::super::dto::{PaymentMethodDto, QrCodeDto};

// push events delivered over the persistent stream connection,
// tag labels kept verbatim from the storefront contract
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(tag = "event", content = "payload")]
pub enum BackendEventDto {
    #[serde(rename = "new activity")]
    NewActivity,
    #[serde(rename = "user notif")]
    UserNotification,
    #[serde(rename = "newChatInbox")]
    NewChatInbox,
    #[serde(rename = "qrcode:update")]
    QrCodeUpdate(QrCodeDto),
    #[serde(rename = "qrcode:delete")]
    QrCodeDelete { payment_method: PaymentMethodDto },
}
