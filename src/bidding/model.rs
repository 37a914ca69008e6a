use crate::config::Config;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// 금액은 정수로 다루지만 백엔드가 50000.0 형태로 보내는 경우가 있어 반올림해서 받는다
fn amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(|v| v.round() as i64)
}

fn optional_amount<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(|v| v.map(|v| v.round() as i64))
}

// 사용자 참조 (id 문자열 또는 populate된 객체)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum UserRef {
    Id(String),
    User(UserSummary),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UserRef {
    pub fn id(&self) -> &str {
        match self {
            UserRef::Id(id) => id,
            UserRef::User(user) => &user.id,
        }
    }
}

// 경매/공고 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    Open,
    Awarded,
    Closed,
    #[default]
    #[serde(other)]
    Other,
}

// 미디어 참조 (상대 경로, Config::media_url로 변환)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRef {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub url: String,
}

// 댓글 모델
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub comment: String,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// 경매 모델
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auction {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "amount")]
    pub starting_price: i64,
    #[serde(default, deserialize_with = "optional_amount")]
    pub current_price: Option<i64>,
    pub ending_at: DateTime<Utc>,
    #[serde(default)]
    pub owner: Option<UserRef>,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub thumbs: Vec<MediaRef>,
    #[serde(default)]
    pub videos: Vec<MediaRef>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Auction {
    /// 표시용 현재가 (입찰이 없으면 시작가)
    pub fn current_price(&self) -> i64 {
        self.current_price.unwrap_or(self.starting_price)
    }

    /// 썸네일과 동영상의 전체 주소
    pub fn media_urls(&self, config: &Config) -> Vec<String> {
        self.thumbs
            .iter()
            .chain(self.videos.iter())
            .map(|m| config.media_url(&m.url))
            .collect()
    }
}

// 입찰 공고 모델
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "optional_amount")]
    pub max_budget: Option<i64>,
    #[serde(default, deserialize_with = "optional_amount")]
    pub current_lowest_bid: Option<i64>,
    pub ending_at: DateTime<Utc>,
    #[serde(default)]
    pub owner: Option<UserRef>,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub attachments: Vec<MediaRef>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

// 공고 입찰 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
}

// 오퍼(입찰) 모델
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(alias = "bidAmount", deserialize_with = "amount")]
    pub price: i64,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub owner: Option<UserRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<OfferStatus>,
}

// 자동 입찰 모델 ((사용자, 경매) 당 최대 1개)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoBid {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(deserialize_with = "amount")]
    pub price: i64,
    #[serde(default)]
    pub user: Option<UserRef>,
}
