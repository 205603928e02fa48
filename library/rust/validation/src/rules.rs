use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"));

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

/// 値が未入力、または前後の空白を除くと空文字列かどうか。
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// validate_required は必須項目の入力有無を検証する。display_name はメッセージに使う表示名。
pub fn validate_required(value: Option<&str>, display_name: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        Err(ValidationError::Required(display_name.to_string()))
    } else {
        Ok(())
    }
}
