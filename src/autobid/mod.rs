/// 자동 입찰 관리
/// (사용자, 경매) 당 하나의 자동 입찰 상한가를 유지한다. 전문가 계정 전용.
// region:    --- Imports
use crate::bidding::normalizer::normalize_amount;
use crate::bidding::reconcile::{reconcile, Reconciliation};
use crate::bidding::target::Biddable;
use crate::error::{format_amount, FlowError, ValidationError, GENERIC_FAILURE_MESSAGE};
use crate::feedback::Toast;
use crate::listing::ListingPage;
use crate::session::Session;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

// endregion: --- Imports

pub const CREATE_LABEL: &str = "Créer Auto-enchère";
pub const UPDATE_LABEL: &str = "Mettre à jour Auto-enchère";

const DELETE_PROMPT: &str = "Voulez-vous vraiment supprimer votre auto-enchère ?";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoBidState {
    pub amount_input: String,
    pub has_existing_auto_bid: bool,
    pub loaded: bool,
}

// region:    --- Auto Bid Panel
pub struct AutoBidPanel<L: Biddable> {
    page: Arc<ListingPage<L>>,
    state: RwLock<AutoBidState>,
}

impl<L: Biddable> AutoBidPanel<L> {
    pub fn new(page: Arc<ListingPage<L>>) -> Self {
        Self {
            page,
            state: RwLock::new(AutoBidState::default()),
        }
    }

    pub async fn state(&self) -> AutoBidState {
        self.state.read().await.clone()
    }

    pub async fn set_amount_input(&self, raw: impl Into<String>) {
        self.state.write().await.amount_input = raw.into();
    }

    pub async fn button_label(&self) -> &'static str {
        if self.state.read().await.has_existing_auto_bid {
            UPDATE_LABEL
        } else {
            CREATE_LABEL
        }
    }

    /// 기존 자동 입찰 조회 후 입력값 초기화
    /// 경매 정보가 바뀔 때마다 다시 호출한다
    pub async fn load(&self) -> Result<(), FlowError> {
        let Some(session) = self.page.client().session().current().await else {
            return Ok(());
        };
        if !session.is_professional() {
            return Ok(());
        }
        let Some(listing) = self.page.listing().await else {
            return Ok(());
        };

        let found = self
            .page
            .client()
            .find_auto_bid(
                L::KIND.auto_bid_prefix(),
                listing.id(),
                &session.user.id,
            )
            .await;

        if self.page.is_disposed() {
            return Err(FlowError::Disposed);
        }

        let mut state = self.state.write().await;
        match found {
            Ok(Some(auto_bid)) => {
                info!(
                    "{:<12} --> 기존 자동 입찰 price: {}",
                    "AutoBid", auto_bid.price
                );
                state.amount_input = auto_bid.price.to_string();
                state.has_existing_auto_bid = true;
            }
            Ok(None) => {
                state.amount_input = listing.auto_bid_baseline().to_string();
                state.has_existing_auto_bid = false;
            }
            Err(e) => {
                // 조회 실패 시 새로 만드는 것으로 간주
                warn!("{:<12} --> 자동 입찰 조회 실패: {}", "AutoBid", e);
                state.amount_input = listing.auto_bid_baseline().to_string();
                state.has_existing_auto_bid = false;
            }
        }
        state.loaded = true;
        Ok(())
    }

    /// 자동 입찰 생성/수정
    pub async fn save(&self) -> Result<i64, FlowError> {
        let session = self.require_professional().await?;
        let listing = self
            .page
            .listing()
            .await
            .ok_or_else(|| self.page.report(FlowError::NotFound))?;

        let raw = self.state.read().await.amount_input.clone();
        let amount = normalize_amount(&raw)
            .and_then(|amount| listing.validate_auto_bid(amount).map(|_| amount))
            .map_err(|e| self.page.report(e.into()))?;

        info!(
            "{:<12} --> 자동 입찰 저장 id: {}, price: {}",
            "AutoBid",
            listing.id(),
            amount
        );
        let result = self
            .page
            .client()
            .upsert_auto_bid(
                L::KIND.auto_bid_prefix(),
                listing.id(),
                amount,
                &session.user.id,
            )
            .await;

        if self.page.is_disposed() {
            return Err(FlowError::Disposed);
        }

        match reconcile(result) {
            Reconciliation::Failed(e) => Err(self.report_failure(e)),
            _ => {
                let was_existing = {
                    let mut state = self.state.write().await;
                    let was_existing = state.has_existing_auto_bid;
                    state.has_existing_auto_bid = true;
                    state.amount_input = amount.to_string();
                    was_existing
                };
                let message = if was_existing {
                    format!("Auto-enchère mise à jour à {} DA.", format_amount(amount))
                } else {
                    format!("Auto-enchère créée à {} DA.", format_amount(amount))
                };
                self.page.feedback().notify(Toast::success(message));
                self.refresh_in_background();
                Ok(amount)
            }
        }
    }

    /// 자동 입찰 삭제 (확인창 필요)
    /// 확인창에서 취소하면 Ok(false)
    pub async fn delete(&self) -> Result<bool, FlowError> {
        let session = self.require_professional().await?;
        let listing = self
            .page
            .listing()
            .await
            .ok_or_else(|| self.page.report(FlowError::NotFound))?;

        if !self.page.feedback().confirm(DELETE_PROMPT) {
            return Ok(false);
        }

        info!("{:<12} --> 자동 입찰 삭제 id: {}", "AutoBid", listing.id());
        let result = self
            .page
            .client()
            .delete_auto_bid(L::KIND.auto_bid_prefix(), listing.id(), &session.user.id)
            .await;

        if self.page.is_disposed() {
            return Err(FlowError::Disposed);
        }

        match reconcile(result) {
            Reconciliation::Failed(e) => Err(self.report_failure(e)),
            _ => {
                {
                    let mut state = self.state.write().await;
                    state.has_existing_auto_bid = false;
                    state.amount_input = listing.auto_bid_baseline().to_string();
                }
                self.page
                    .feedback()
                    .notify(Toast::success("Auto-enchère supprimée."));
                self.refresh_in_background();
                Ok(true)
            }
        }
    }

    // 전문가 계정만 자동 입찰을 만들거나 지울 수 있다
    async fn require_professional(&self) -> Result<Session, FlowError> {
        let session = self.page.require_session().await?;
        if !session.is_professional() {
            warn!(
                "{:<12} --> 전문가 계정 아님 user: {}",
                "AutoBid", session.user.id
            );
            return Err(self
                .page
                .report(ValidationError::ProfessionalOnly.into()));
        }
        Ok(session)
    }

    // 실제 실패는 서버 메시지 또는 일반 메시지로 안내하고 상태는 그대로 둔다
    fn report_failure(&self, err: FlowError) -> FlowError {
        warn!("{:<12} --> 자동 입찰 실패: {}", "AutoBid", err);
        let message = match &err {
            FlowError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            FlowError::Rejected { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.user_message(),
        };
        if matches!(err, FlowError::Unauthenticated) {
            self.page.feedback().redirect_to_login();
        }
        self.page.feedback().notify(Toast::error(message));
        err
    }

    fn refresh_in_background(&self) {
        let page = Arc::clone(&self.page);
        tokio::spawn(async move {
            page.refresh().await;
        });
    }
}

// endregion: --- Auto Bid Panel
