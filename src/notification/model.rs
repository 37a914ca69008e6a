use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 알림 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    BidWon,
    ChatCreated,
    BidCreated,
    NewOffer,
    BidEnded,
    #[serde(other)]
    Other,
}

impl NotificationType {
    /// 드롭다운 표시용 라벨
    pub fn label(&self) -> &'static str {
        match self {
            NotificationType::BidWon => "Enchère remportée",
            NotificationType::ChatCreated => "Nouvelle discussion",
            NotificationType::BidCreated => "Nouvelle enchère",
            NotificationType::NewOffer => "Nouvelle offre",
            NotificationType::BidEnded => "Enchère terminée",
            NotificationType::Other => "Notification",
        }
    }
}

// 알림 모델
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
