use crate::error::ValidationError;

/// 입력창 문자열을 정수 금액으로 변환
/// "12,500,00" 같은 표기(끝의 ",00", 천 단위 쉼표, 통화 기호)를 허용한다.
pub fn normalize_amount(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.starts_with('-') {
        return Err(ValidationError::InvalidAmount);
    }

    let without_cents = trimmed.strip_suffix(",00").unwrap_or(trimmed);
    let cleaned: String = without_cents
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let value: f64 = cleaned
        .parse()
        .map_err(|_| ValidationError::InvalidAmount)?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidAmount);
    }

    // i64 범위를 넘으면 캐스팅이 포화되므로 거절
    let rounded = value.round();
    if rounded >= i64::MAX as f64 {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(rounded as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_grouped_amounts() {
        assert_eq!(normalize_amount("50000"), Ok(50000));
        assert_eq!(normalize_amount("12,500"), Ok(12500));
        assert_eq!(normalize_amount("1,250,000"), Ok(1250000));
    }

    #[test]
    fn test_trailing_cents_and_whitespace() {
        assert_eq!(normalize_amount("12,500,00 "), Ok(12500));
        assert_eq!(normalize_amount("  7,00"), Ok(7));
    }

    #[test]
    fn test_currency_noise_and_rounding() {
        assert_eq!(normalize_amount("15 000 DA"), Ok(15000));
        assert_eq!(normalize_amount("99.6"), Ok(100));
    }

    #[test]
    fn test_rejects_invalid_amounts() {
        for raw in ["0", "-5", "abc", "", "   ", "1.2.3", ",00", "0.4"] {
            assert_eq!(
                normalize_amount(raw),
                Err(ValidationError::InvalidAmount),
                "input {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_rejects_amounts_beyond_integer_range() {
        assert_eq!(
            normalize_amount("99999999999999999999999"),
            Err(ValidationError::InvalidAmount)
        );
        assert_eq!(
            normalize_amount("9223372036854775807"),
            Err(ValidationError::InvalidAmount)
        );
        assert_eq!(
            normalize_amount("9,000,000,000,000"),
            Ok(9_000_000_000_000)
        );
    }
}
