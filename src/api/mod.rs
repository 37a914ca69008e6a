/// 백엔드 HTTP API 클라이언트
/// 모든 요청은 설정된 기본 주소와 세션 토큰(Bearer)을 사용한다.
// region:    --- Imports
mod error;
pub mod routes;

pub use error::ApiError;

use crate::bidding::model::{Auction, AutoBid, Offer, Tender};
use crate::config::Config;
use crate::notification::model::Notification;
use crate::session::SessionHandle;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

// endregion: --- Imports

// region:    --- Api Client
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: SessionHandle,
}

#[derive(Deserialize)]
struct NotificationsEnvelope {
    #[serde(default)]
    notifications: Vec<Notification>,
}

impl ApiClient {
    pub fn new(config: &Config, session: SessionHandle) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            session,
        })
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// 인증 헤더가 포함된 요청 생성
    async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|_| ApiError::InvalidPath(path.to_string()))?;
        debug!("{:<12} --> {} {}", "Api", method, url);
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.session.token().await {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// 응답 본문을 T로 역직렬화
    /// 2xx지만 본문이 기대한 형태가 아니면 Decode 오류로 상태 코드와 함께 반환
    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let payload: Option<Value> = serde_json::from_slice(&bytes).ok();

        if !status.is_success() {
            warn!(
                "{:<12} --> 요청 실패 status: {}, payload: {:?}",
                "Api", status, payload
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                payload,
            });
        }

        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            status: status.as_u16(),
            payload,
            source,
        })
    }

    /// 본문이 필요 없는 요청
    async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let payload = response.json::<Value>().await.ok();
        warn!(
            "{:<12} --> 요청 실패 status: {}, payload: {:?}",
            "Api", status, payload
        );
        Err(ApiError::Status {
            status: status.as_u16(),
            payload,
        })
    }

    // region:    --- Listings

    pub async fn list_auctions(&self) -> Result<Vec<Auction>, ApiError> {
        let req = self.request(Method::GET, routes::AUCTIONS).await?;
        self.send_json(req).await
    }

    pub async fn get_auction(&self, auction_id: &str) -> Result<Auction, ApiError> {
        let req = self.request(Method::GET, &routes::auction(auction_id)).await?;
        self.send_json(req).await
    }

    pub async fn list_tenders(&self) -> Result<Vec<Tender>, ApiError> {
        let req = self.request(Method::GET, routes::TENDERS).await?;
        self.send_json(req).await
    }

    pub async fn get_tender(&self, tender_id: &str) -> Result<Tender, ApiError> {
        let req = self.request(Method::GET, &routes::tender(tender_id)).await?;
        self.send_json(req).await
    }

    // endregion: --- Listings

    // region:    --- Offers

    pub async fn list_auction_offers(&self, auction_id: &str) -> Result<Vec<Offer>, ApiError> {
        let req = self
            .request(Method::GET, &routes::offers(auction_id))
            .await?;
        self.send_json(req).await
    }

    pub async fn create_auction_offer(
        &self,
        auction_id: &str,
        price: i64,
        user_id: &str,
        owner_id: Option<&str>,
    ) -> Result<Offer, ApiError> {
        let req = self
            .request(Method::POST, &routes::offers(auction_id))
            .await?
            .json(&json!({ "price": price, "user": user_id, "owner": owner_id }));
        self.send_json(req).await
    }

    pub async fn list_tender_bids(&self, tender_id: &str) -> Result<Vec<Offer>, ApiError> {
        let req = self
            .request(Method::GET, &routes::tender_bids(tender_id))
            .await?;
        self.send_json(req).await
    }

    /// 공고 입찰은 오퍼 경로로 금액만 보낸다 (사용자는 토큰으로 식별)
    pub async fn create_tender_bid(
        &self,
        tender_id: &str,
        bid_amount: i64,
    ) -> Result<Offer, ApiError> {
        let req = self
            .request(Method::POST, &routes::offers(tender_id))
            .await?
            .json(&json!({ "bidAmount": bid_amount }));
        self.send_json(req).await
    }

    // endregion: --- Offers

    // region:    --- Auto Bids

    /// 자동 입찰 조회 (없으면 None)
    pub async fn find_auto_bid(
        &self,
        prefix: &str,
        listing_id: &str,
        user_id: &str,
    ) -> Result<Option<AutoBid>, ApiError> {
        let req = self
            .request(
                Method::GET,
                &routes::user_auto_bid(prefix, listing_id, user_id),
            )
            .await?;
        match self.send_json::<Option<AutoBid>>(req).await {
            Ok(auto_bid) => Ok(auto_bid),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// 자동 입찰 생성/수정 (같은 호출)
    pub async fn upsert_auto_bid(
        &self,
        prefix: &str,
        listing_id: &str,
        price: i64,
        user_id: &str,
    ) -> Result<AutoBid, ApiError> {
        let req = self
            .request(Method::POST, &routes::auto_bid(prefix, listing_id))
            .await?
            .json(&json!({ "price": price, "user": user_id }));
        self.send_json(req).await
    }

    pub async fn delete_auto_bid(
        &self,
        prefix: &str,
        listing_id: &str,
        user_id: &str,
    ) -> Result<(), ApiError> {
        let req = self
            .request(
                Method::DELETE,
                &routes::user_auto_bid(prefix, listing_id, user_id),
            )
            .await?;
        self.send_empty(req).await
    }

    // endregion: --- Auto Bids

    // region:    --- Comments & Reviews

    pub async fn post_comment(
        &self,
        listing_id: &str,
        comment: &str,
        user_id: &str,
    ) -> Result<(), ApiError> {
        let req = self
            .request(Method::POST, &routes::comment(listing_id))
            .await?
            .json(&json!({ "comment": comment, "user": user_id }));
        self.send_empty(req).await
    }

    pub async fn post_review(
        &self,
        listing_id: &str,
        rating: u8,
        comment: &str,
        user_id: &str,
    ) -> Result<(), ApiError> {
        let req = self
            .request(Method::POST, &routes::review(listing_id))
            .await?
            .json(&json!({ "rating": rating, "comment": comment, "user": user_id }));
        self.send_empty(req).await
    }

    // endregion: --- Comments & Reviews

    // region:    --- Notifications

    pub async fn general_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let req = self
            .request(Method::GET, routes::GENERAL_NOTIFICATIONS)
            .await?;
        let envelope: NotificationsEnvelope = self.send_json(req).await?;
        Ok(envelope.notifications)
    }

    pub async fn mark_notification_read(&self, notification_id: &str) -> Result<(), ApiError> {
        let req = self
            .request(Method::PUT, &routes::notification_read(notification_id))
            .await?;
        self.send_empty(req).await
    }

    // endregion: --- Notifications
}

// endregion: --- Api Client
