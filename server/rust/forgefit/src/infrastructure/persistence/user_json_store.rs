use forgefit_kvstore::{JsonStore, StoreError};

use crate::domain::entity::user_record::UserRecord;
use crate::domain::repository::UserRepository;

pub const USERS_KEY: &str = "admin_users";

/// ユーザー一覧を `admin_users` に 1 つの JSON 配列として保存する。
pub struct UserJsonStoreRepository {
    store: JsonStore,
}

impl UserJsonStoreRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }
}

impl UserRepository for UserJsonStoreRepository {
    fn load(&self) -> Result<Option<Vec<UserRecord>>, StoreError> {
        self.store.load(USERS_KEY)
    }

    fn save(&self, users: &[UserRecord]) -> Result<(), StoreError> {
        self.store.save(USERS_KEY, users)
    }
}
