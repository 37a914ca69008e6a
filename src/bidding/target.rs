/// 입찰 대상(경매/공고) 공통 인터페이스
/// 경매와 공고는 같은 입찰 흐름을 사용하고 검증 규칙과 제출 호출만 다르다.
// region:    --- Imports
use super::model::{Auction, Offer, Tender};
use crate::api::{ApiClient, ApiError};
use crate::error::ValidationError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

// endregion: --- Imports

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Auction,
    Tender,
}

impl ListingKind {
    /// 자동 입찰 경로 접두사
    pub fn auto_bid_prefix(&self) -> &'static str {
        match self {
            ListingKind::Auction => "auto-bid",
            ListingKind::Tender => "auto-bid/tender",
        }
    }
}

#[async_trait]
pub trait Biddable: Clone + Send + Sync + 'static {
    const KIND: ListingKind;

    fn id(&self) -> &str;
    fn owner_id(&self) -> Option<&str>;
    fn ending_at(&self) -> DateTime<Utc>;

    /// 입찰 금액 검증 (네트워크 호출 전)
    fn validate_bid(&self, amount: i64) -> Result<(), ValidationError>;

    /// 자동 입찰 기본값 (시작가 / 최대 예산)
    fn auto_bid_baseline(&self) -> i64;

    fn validate_auto_bid(&self, amount: i64) -> Result<(), ValidationError>;

    async fn fetch(client: &ApiClient, id: &str) -> Result<Self, ApiError>;

    async fn fetch_offers(client: &ApiClient, id: &str) -> Result<Vec<Offer>, ApiError>;

    async fn submit(
        &self,
        client: &ApiClient,
        amount: i64,
        user_id: &str,
    ) -> Result<Offer, ApiError>;
}

// region:    --- Auction
#[async_trait]
impl Biddable for Auction {
    const KIND: ListingKind = ListingKind::Auction;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> Option<&str> {
        self.owner.as_ref().map(|o| o.id())
    }

    fn ending_at(&self) -> DateTime<Utc> {
        self.ending_at
    }

    fn validate_bid(&self, amount: i64) -> Result<(), ValidationError> {
        if amount <= 0 {
            return Err(ValidationError::InvalidAmount);
        }
        let current_price = self.current_price();
        if amount <= current_price {
            return Err(ValidationError::BelowCurrentPrice { current_price });
        }
        Ok(())
    }

    fn auto_bid_baseline(&self) -> i64 {
        self.starting_price
    }

    fn validate_auto_bid(&self, amount: i64) -> Result<(), ValidationError> {
        if amount <= 0 {
            return Err(ValidationError::InvalidAmount);
        }
        if amount < self.starting_price {
            return Err(ValidationError::BelowStartingPrice {
                starting_price: self.starting_price,
            });
        }
        Ok(())
    }

    async fn fetch(client: &ApiClient, id: &str) -> Result<Self, ApiError> {
        client.get_auction(id).await
    }

    async fn fetch_offers(client: &ApiClient, id: &str) -> Result<Vec<Offer>, ApiError> {
        client.list_auction_offers(id).await
    }

    async fn submit(
        &self,
        client: &ApiClient,
        amount: i64,
        user_id: &str,
    ) -> Result<Offer, ApiError> {
        client
            .create_auction_offer(&self.id, amount, user_id, self.owner_id())
            .await
    }
}

// endregion: --- Auction

// region:    --- Tender
/// 공고는 최저가 규칙을 서버가 검증하므로 양수 여부만 확인
#[async_trait]
impl Biddable for Tender {
    const KIND: ListingKind = ListingKind::Tender;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_id(&self) -> Option<&str> {
        self.owner.as_ref().map(|o| o.id())
    }

    fn ending_at(&self) -> DateTime<Utc> {
        self.ending_at
    }

    fn validate_bid(&self, amount: i64) -> Result<(), ValidationError> {
        if amount <= 0 {
            return Err(ValidationError::InvalidAmount);
        }
        Ok(())
    }

    fn auto_bid_baseline(&self) -> i64 {
        self.max_budget.unwrap_or(0)
    }

    fn validate_auto_bid(&self, amount: i64) -> Result<(), ValidationError> {
        if amount <= 0 {
            return Err(ValidationError::InvalidAmount);
        }
        match self.max_budget {
            Some(max_budget) if amount > max_budget => {
                Err(ValidationError::AboveMaxBudget { max_budget })
            }
            _ => Ok(()),
        }
    }

    async fn fetch(client: &ApiClient, id: &str) -> Result<Self, ApiError> {
        client.get_tender(id).await
    }

    async fn fetch_offers(client: &ApiClient, id: &str) -> Result<Vec<Offer>, ApiError> {
        client.list_tender_bids(id).await
    }

    async fn submit(
        &self,
        client: &ApiClient,
        amount: i64,
        _user_id: &str,
    ) -> Result<Offer, ApiError> {
        client.create_tender_bid(&self.id, amount).await
    }
}

// endregion: --- Tender
