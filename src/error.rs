/// 클라이언트 흐름 오류 분류
/// 모든 실패는 핸들러 경계에서 토스트 메시지로 변환된다.
// region:    --- Imports
use crate::api::ApiError;
use thiserror::Error;

// endregion: --- Imports

// region:    --- Validation
/// 네트워크 호출 전에 걸러지는 입력 오류
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("INVALID_AMOUNT")]
    InvalidAmount,
    #[error("BELOW_CURRENT_PRICE: amount must exceed {current_price}")]
    BelowCurrentPrice { current_price: i64 },
    #[error("BELOW_STARTING_PRICE: amount must be at least {starting_price}")]
    BelowStartingPrice { starting_price: i64 },
    #[error("ABOVE_MAX_BUDGET: amount must not exceed {max_budget}")]
    AboveMaxBudget { max_budget: i64 },
    #[error("SELF_BID_FORBIDDEN")]
    SelfBidForbidden,
    #[error("PROFESSIONAL_ONLY")]
    ProfessionalOnly,
    #[error("EMPTY_COMMENT")]
    EmptyComment,
    #[error("INVALID_RATING: {0}")]
    InvalidRating(u8),
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidAmount => "INVALID_AMOUNT",
            ValidationError::BelowCurrentPrice { .. } => "BELOW_CURRENT_PRICE",
            ValidationError::BelowStartingPrice { .. } => "BELOW_STARTING_PRICE",
            ValidationError::AboveMaxBudget { .. } => "ABOVE_MAX_BUDGET",
            ValidationError::SelfBidForbidden => "SELF_BID_FORBIDDEN",
            ValidationError::ProfessionalOnly => "PROFESSIONAL_ONLY",
            ValidationError::EmptyComment => "EMPTY_COMMENT",
            ValidationError::InvalidRating(_) => "INVALID_RATING",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ValidationError::InvalidAmount => "Veuillez saisir un montant valide.".to_string(),
            ValidationError::BelowCurrentPrice { current_price } => format!(
                "Votre offre doit être supérieure au prix actuel ({} DA).",
                format_amount(*current_price)
            ),
            ValidationError::BelowStartingPrice { starting_price } => format!(
                "Le montant doit être au moins égal au prix de départ ({} DA).",
                format_amount(*starting_price)
            ),
            ValidationError::AboveMaxBudget { max_budget } => format!(
                "Le montant ne peut pas dépasser le budget maximum ({} DA).",
                format_amount(*max_budget)
            ),
            ValidationError::SelfBidForbidden => {
                "Vous ne pouvez pas enchérir sur votre propre annonce.".to_string()
            }
            ValidationError::ProfessionalOnly => {
                "L'auto-enchère est réservée aux comptes professionnels.".to_string()
            }
            ValidationError::EmptyComment => "Le commentaire ne peut pas être vide.".to_string(),
            ValidationError::InvalidRating(_) => {
                "La note doit être comprise entre 1 et 5.".to_string()
            }
        }
    }
}

// endregion: --- Validation

// region:    --- Offer Error Codes
/// 서버가 보내는 OFFER.* 오류 코드 (최소 지원 집합)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferErrorCode {
    InvalidPrice,
    AuctionEnded,
    InsufficientAmount,
    OwnerCannotBid,
}

impl OfferErrorCode {
    const ALL: [OfferErrorCode; 4] = [
        OfferErrorCode::InvalidPrice,
        OfferErrorCode::AuctionEnded,
        OfferErrorCode::InsufficientAmount,
        OfferErrorCode::OwnerCannotBid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OfferErrorCode::InvalidPrice => "OFFER.INVALID_PRICE",
            OfferErrorCode::AuctionEnded => "OFFER.AUCTION_ENDED",
            OfferErrorCode::InsufficientAmount => "OFFER.INSUFFICIENT_AMOUNT",
            OfferErrorCode::OwnerCannotBid => "OFFER.OWNER_CANNOT_BID",
        }
    }

    /// 서버 메시지 안에 포함된 코드 검색
    pub fn find_in(message: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|code| message.contains(code.as_str()))
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            OfferErrorCode::InvalidPrice => "Le prix proposé n'est pas valide.",
            OfferErrorCode::AuctionEnded => "Cette enchère est terminée.",
            OfferErrorCode::InsufficientAmount => {
                "Le montant proposé est insuffisant par rapport à l'offre actuelle."
            }
            OfferErrorCode::OwnerCannotBid => {
                "Le propriétaire ne peut pas enchérir sur sa propre annonce."
            }
        }
    }
}

// endregion: --- Offer Error Codes

// region:    --- Flow Error
pub const GENERIC_FAILURE_MESSAGE: &str = "Une erreur est survenue. Veuillez réessayer.";
pub const NETWORK_FAILURE_MESSAGE: &str =
    "Impossible de joindre le serveur. Vérifiez votre connexion.";
pub const SERVER_FAILURE_MESSAGE: &str =
    "Le serveur est momentanément indisponible. Veuillez réessayer plus tard.";

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("UNAUTHENTICATED")]
    Unauthenticated,
    #[error("VALIDATION_ERROR: {0}")]
    Validation(#[from] ValidationError),
    #[error("NETWORK_ERROR: {0}")]
    Network(String),
    #[error("SERVER_ERROR: status {status}")]
    Server { status: u16 },
    #[error("HARD_FAILURE: {code:?} {message:?}")]
    Rejected {
        code: Option<OfferErrorCode>,
        message: Option<String>,
    },
    #[error("submission already in flight")]
    InFlight,
    #[error("NOT_FOUND")]
    NotFound,
    #[error("response arrived after the page was disposed")]
    Disposed,
}

impl FlowError {
    /// 재조정에서 성공으로 판정되지 않은 오류를 분류
    pub fn from_api(err: &ApiError) -> Self {
        match err {
            ApiError::Network(e) if e.status().is_none() => FlowError::Network(e.to_string()),
            ApiError::InvalidPath(path) => FlowError::Network(path.clone()),
            _ => match err.status() {
                Some(404) => FlowError::NotFound,
                Some(401) => FlowError::Unauthenticated,
                Some(status) if status >= 500 => FlowError::Server { status },
                _ => {
                    let message = err.server_message();
                    FlowError::Rejected {
                        code: message.as_deref().and_then(OfferErrorCode::find_in),
                        message,
                    }
                }
            },
        }
    }

    /// 토스트에 표시할 메시지
    pub fn user_message(&self) -> String {
        match self {
            FlowError::Unauthenticated => "Veuillez vous connecter pour continuer.".to_string(),
            FlowError::Validation(e) => e.user_message(),
            FlowError::Network(_) => NETWORK_FAILURE_MESSAGE.to_string(),
            FlowError::Server { .. } => SERVER_FAILURE_MESSAGE.to_string(),
            FlowError::Rejected {
                code: Some(code), ..
            } => code.user_message().to_string(),
            FlowError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            FlowError::Rejected { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
            FlowError::InFlight => "Une offre est déjà en cours d'envoi.".to_string(),
            FlowError::NotFound => "Annonce introuvable.".to_string(),
            FlowError::Disposed => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

// endregion: --- Flow Error

/// 천 단위 구분 기호가 들어간 금액 표시 (12500 -> "12,500")
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if amount < 0 {
        format!("-{}", out)
    } else {
        out
    }
}
