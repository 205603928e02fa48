use forgefit_kvstore::StoreError;

use crate::domain::entity::column::Column;

/// カラム定義リストの永続化。リストは 1 つのドキュメントとして丸ごと読み書きする。
#[cfg_attr(test, mockall::automock)]
pub trait ColumnRepository: Send + Sync {
    /// 未保存なら None。保存内容を解釈できなければ StoreError::Corrupt。
    fn load(&self) -> Result<Option<Vec<Column>>, StoreError>;
    fn save(&self, columns: &[Column]) -> Result<(), StoreError>;
}
