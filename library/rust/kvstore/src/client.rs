use std::sync::LazyLock;

use regex::Regex;

use crate::StoreError;

static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("static key pattern"));

/// KeyValueStore はキー単位で JSON テキストを読み書きするストア。
///
/// 読み書きは呼び出し元から見て即時かつアトミックで、部分書き込みは観測されない。
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// キーを削除する。存在していた場合は true を返す。
    fn remove(&self, key: &str) -> Result<bool, StoreError>;
}

/// validate_key はストアキーが英数字・`_`・`-` のみで構成されているか検証する。
/// ファイルストアではキーがそのままファイル名になるため、パス区切りを拒否する。
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    if KEY_PATTERN.is_match(key) {
        Ok(())
    } else {
        Err(StoreError::InvalidKey {
            key: key.to_string(),
        })
    }
}
