use forgefit_kvstore::StoreError;

use crate::domain::entity::user_record::UserRecord;

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    /// 未保存なら None。保存内容を解釈できなければ StoreError::Corrupt。
    fn load(&self) -> Result<Option<Vec<UserRecord>>, StoreError>;
    fn save(&self, users: &[UserRecord]) -> Result<(), StoreError>;
}
