// region:    --- Imports
use super::ListingPage;
use crate::bidding::target::Biddable;
use crate::error::{FlowError, ValidationError};
use crate::feedback::Toast;
use crate::session::Session;
use tracing::info;

// endregion: --- Imports

// region:    --- Comments & Reviews
impl<L: Biddable> ListingPage<L> {
    /// 댓글 작성
    pub async fn post_comment(&self, text: &str) -> Result<(), FlowError> {
        let session = self.require_session().await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(self.report(ValidationError::EmptyComment.into()));
        }

        info!(
            "{:<12} --> 댓글 작성 id: {}",
            "Comment",
            self.listing_id()
        );
        match self
            .client()
            .post_comment(self.listing_id(), text, &session.user.id)
            .await
        {
            Ok(()) => {
                self.feedback()
                    .notify(Toast::success("Commentaire publié avec succès."));
                self.refresh().await;
                Ok(())
            }
            Err(e) => Err(self.report(FlowError::from_api(&e))),
        }
    }

    /// 리뷰 작성 (평점 1~5)
    pub async fn post_review(&self, rating: u8, text: &str) -> Result<(), FlowError> {
        let session = self.require_session().await?;
        if !(1..=5).contains(&rating) {
            return Err(self.report(ValidationError::InvalidRating(rating).into()));
        }

        info!(
            "{:<12} --> 리뷰 작성 id: {}, rating: {}",
            "Review",
            self.listing_id(),
            rating
        );
        match self
            .client()
            .post_review(self.listing_id(), rating, text.trim(), &session.user.id)
            .await
        {
            Ok(()) => {
                self.feedback()
                    .notify(Toast::success("Merci pour votre avis !"));
                self.refresh().await;
                Ok(())
            }
            Err(e) => Err(self.report(FlowError::from_api(&e))),
        }
    }

    pub(crate) async fn require_session(&self) -> Result<Session, FlowError> {
        match self.client().session().current().await {
            Some(session) => Ok(session),
            None => {
                self.feedback().redirect_to_login();
                Err(FlowError::Unauthenticated)
            }
        }
    }

    pub(crate) fn report(&self, err: FlowError) -> FlowError {
        if matches!(err, FlowError::Unauthenticated) {
            self.feedback().redirect_to_login();
        }
        self.feedback().notify(Toast::error(err.user_message()));
        err
    }
}

// endregion: --- Comments & Reviews
