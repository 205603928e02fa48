use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("不正なストアキーです: {key}")]
    InvalidKey { key: String },
    #[error("保存データを解釈できません: {key}")]
    Corrupt { key: String },
    #[error("シリアライズエラー: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("I/O エラー: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// 保存データ破損によるエラーかどうかを返す。
    /// 呼び出し側はこの場合に既定値へフォールバックする。
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}
