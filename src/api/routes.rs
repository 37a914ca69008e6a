/// 경매 목록
pub const AUCTIONS: &str = "bid";

/// 입찰 공고(tender) 목록
pub const TENDERS: &str = "tender";

/// 일반 알림 목록
pub const GENERAL_NOTIFICATIONS: &str = "notification/general";

/// 경매 조회
pub fn auction(id: &str) -> String {
    format!("bid/{}", id)
}

/// 공고 조회
pub fn tender(id: &str) -> String {
    format!("tender/{}", id)
}

/// 오퍼 생성 (경매/공고 공통) 및 경매 오퍼 목록
pub fn offers(listing_id: &str) -> String {
    format!("offer/{}", listing_id)
}

/// 공고 입찰 목록
pub fn tender_bids(tender_id: &str) -> String {
    format!("tender/{}/bids", tender_id)
}

/// 자동 입찰 upsert
pub fn auto_bid(prefix: &str, listing_id: &str) -> String {
    format!("{}/{}", prefix, listing_id)
}

/// 자동 입찰 조회 및 삭제
pub fn user_auto_bid(prefix: &str, listing_id: &str, user_id: &str) -> String {
    format!("{}/{}/{}", prefix, listing_id, user_id)
}

/// 댓글 작성
pub fn comment(listing_id: &str) -> String {
    format!("comment/{}", listing_id)
}

/// 리뷰 작성
pub fn review(listing_id: &str) -> String {
    format!("review/{}", listing_id)
}

/// 알림 읽음 처리
pub fn notification_read(notification_id: &str) -> String {
    format!("notification/{}/read", notification_id)
}
