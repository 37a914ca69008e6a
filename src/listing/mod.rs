/// 경매/공고 상세 페이지 상태
/// 변경 작업(입찰, 댓글, 리뷰, 자동 입찰) 후에는 항상 전체를 다시 조회해서 교체한다.
// region:    --- Imports
mod comments;

use crate::api::ApiClient;
use crate::bidding::model::Offer;
use crate::bidding::target::Biddable;
use crate::error::FlowError;
use crate::feedback::Feedback;
use crate::scheduler::Countdown;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Listing Page
struct PageState<L> {
    listing: Option<L>,
    offers: Vec<Offer>,
    not_found: bool,
}

pub struct ListingPage<L: Biddable> {
    client: ApiClient,
    feedback: Arc<dyn Feedback>,
    listing_id: String,
    state: RwLock<PageState<L>>,
    disposed: AtomicBool,
}

impl<L: Biddable> ListingPage<L> {
    pub fn new(
        client: ApiClient,
        feedback: Arc<dyn Feedback>,
        listing_id: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            client,
            feedback,
            listing_id: listing_id.into(),
            state: RwLock::new(PageState {
                listing: None,
                offers: Vec::new(),
                not_found: false,
            }),
            disposed: AtomicBool::new(false),
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn feedback(&self) -> &dyn Feedback {
        self.feedback.as_ref()
    }

    pub fn listing_id(&self) -> &str {
        &self.listing_id
    }

    /// 최초 조회 (재시도 버튼도 같은 호출)
    pub async fn load(&self) -> Result<(), FlowError> {
        info!(
            "{:<12} --> {:?} 조회 id: {}",
            "Listing",
            L::KIND,
            self.listing_id
        );
        let listing = match L::fetch(&self.client, &self.listing_id).await {
            Ok(listing) => listing,
            Err(e) => {
                let err = FlowError::from_api(&e);
                if matches!(err, FlowError::NotFound) && !self.is_disposed() {
                    self.state.write().await.not_found = true;
                }
                warn!("{:<12} --> 조회 실패: {}", "Listing", e);
                return Err(err);
            }
        };

        let offers = match L::fetch_offers(&self.client, &self.listing_id).await {
            Ok(offers) => offers,
            Err(e) => {
                warn!("{:<12} --> 오퍼 목록 조회 실패: {}", "Listing", e);
                Vec::new()
            }
        };

        self.apply(listing, offers).await;
        Ok(())
    }

    /// 변경 작업 이후 재조회
    /// 변경 자체는 이미 성공했으므로 실패는 기록만 한다
    pub async fn refresh(&self) {
        let listing = match L::fetch(&self.client, &self.listing_id).await {
            Ok(listing) => listing,
            Err(e) => {
                warn!("{:<12} --> 재조회 실패 (무시): {}", "Listing", e);
                return;
            }
        };
        match L::fetch_offers(&self.client, &self.listing_id).await {
            Ok(offers) => self.apply(listing, offers).await,
            Err(e) => {
                warn!("{:<12} --> 오퍼 재조회 실패 (무시): {}", "Listing", e);
                if !self.is_disposed() {
                    self.state.write().await.listing = Some(listing);
                }
            }
        }
    }

    async fn apply(&self, listing: L, offers: Vec<Offer>) {
        // 페이지가 닫힌 뒤 도착한 응답은 버린다
        if self.is_disposed() {
            info!("{:<12} --> 닫힌 페이지의 응답 무시", "Listing");
            return;
        }
        let mut state = self.state.write().await;
        state.listing = Some(listing);
        state.offers = offers;
        state.not_found = false;
    }

    pub async fn listing(&self) -> Option<L> {
        self.state.read().await.listing.clone()
    }

    pub async fn offers(&self) -> Vec<Offer> {
        self.state.read().await.offers.clone()
    }

    /// 현재 경매/공고의 종료 시각 카운트다운 (조회 전이면 None)
    pub async fn countdown(&self) -> Option<Countdown> {
        let ending_at = self.state.read().await.listing.as_ref()?.ending_at();
        Some(Countdown::start(ending_at))
    }

    pub async fn is_not_found(&self) -> bool {
        self.state.read().await.not_found
    }

    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

// endregion: --- Listing Page
