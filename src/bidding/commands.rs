/// 입찰 제출 흐름
/// 1. 검증 (세션, 본인 입찰, 금액)
/// 2. 제출
/// 3. 재조정 (오류 응답이 실제 성공인지 판정)
/// 4. 상세 정보 재조회
// region:    --- Imports
use super::model::Offer;
use super::normalizer::normalize_amount;
use super::reconcile::{reconcile, Reconciliation};
use super::target::Biddable;
use crate::error::{format_amount, FlowError, ValidationError};
use crate::feedback::Toast;
use crate::listing::ListingPage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Bid Flow State
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidFlowState {
    Idle,
    Validating,
    Submitting,
    Success { reconciled: bool },
    HardFailure,
}

/// 제출 결과
#[derive(Debug, Clone)]
pub struct BidOutcome {
    pub amount: i64,
    /// 위장된 성공이면 None
    pub offer: Option<Offer>,
    pub reconciled: bool,
}

// 제출 중 플래그는 어떤 경로로 끝나든 해제
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// endregion: --- Bid Flow State

// region:    --- Bid Flow
pub struct BidFlow<L: Biddable> {
    page: Arc<ListingPage<L>>,
    input: RwLock<String>,
    state: RwLock<BidFlowState>,
    in_flight: AtomicBool,
}

impl<L: Biddable> BidFlow<L> {
    pub fn new(page: Arc<ListingPage<L>>) -> Self {
        Self {
            page,
            input: RwLock::new(String::new()),
            state: RwLock::new(BidFlowState::Idle),
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn set_input(&self, raw: impl Into<String>) {
        *self.input.write().await = raw.into();
    }

    pub async fn input(&self) -> String {
        self.input.read().await.clone()
    }

    pub async fn state(&self) -> BidFlowState {
        *self.state.read().await
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// 입찰 버튼 활성화 여부 (소유자는 자기 매물에 입찰 불가)
    pub async fn can_bid(&self) -> bool {
        let Some(listing) = self.page.listing().await else {
            return false;
        };
        match self.page.client().session().current().await {
            Some(session) => listing.owner_id() != Some(session.user.id.as_str()),
            None => true,
        }
    }

    /// 입찰 제출
    pub async fn submit(&self) -> Result<BidOutcome, FlowError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            warn!("{:<12} --> 중복 제출 차단", "BidFlow");
            return Err(FlowError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        self.set_state(BidFlowState::Validating).await;
        let (listing, user_id, amount) = match self.validate().await {
            Ok(validated) => validated,
            Err(e) => {
                self.set_state(BidFlowState::Idle).await;
                return Err(self.page.report(e));
            }
        };

        info!(
            "{:<12} --> 입찰 제출 {:?} id: {}, amount: {}",
            "BidFlow",
            L::KIND,
            listing.id(),
            amount
        );
        self.set_state(BidFlowState::Submitting).await;
        let result = listing
            .submit(self.page.client(), amount, &user_id)
            .await;

        if self.page.is_disposed() {
            info!("{:<12} --> 닫힌 페이지의 입찰 응답 무시", "BidFlow");
            self.set_state(BidFlowState::Idle).await;
            return Err(FlowError::Disposed);
        }

        let (offer, reconciled) = match reconcile(result) {
            Reconciliation::Confirmed(offer) => (Some(offer), false),
            Reconciliation::DisguisedSuccess => (None, true),
            Reconciliation::Failed(e) => {
                warn!("{:<12} --> 입찰 실패: {}", "BidFlow", e);
                self.set_state(BidFlowState::HardFailure).await;
                return Err(self.page.report(e));
            }
        };

        self.page.feedback().notify(Toast::success(format!(
            "Votre offre de {} DA a été placée avec succès !",
            format_amount(amount)
        )));
        self.input.write().await.clear();
        self.page.refresh().await;
        self.set_state(BidFlowState::Success { reconciled }).await;

        Ok(BidOutcome {
            amount,
            offer,
            reconciled,
        })
    }

    async fn validate(&self) -> Result<(L, String, i64), FlowError> {
        let session = self
            .page
            .client()
            .session()
            .current()
            .await
            .ok_or(FlowError::Unauthenticated)?;
        let listing = self.page.listing().await.ok_or(FlowError::NotFound)?;

        if listing.owner_id() == Some(session.user.id.as_str()) {
            return Err(ValidationError::SelfBidForbidden.into());
        }

        let amount = normalize_amount(&self.input().await)?;
        listing.validate_bid(amount)?;

        Ok((listing, session.user.id, amount))
    }

    async fn set_state(&self, state: BidFlowState) {
        *self.state.write().await = state;
    }
}

// endregion: --- Bid Flow
