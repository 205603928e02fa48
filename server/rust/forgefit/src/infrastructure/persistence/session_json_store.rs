use forgefit_kvstore::{JsonStore, StoreError};
use uuid::Uuid;

use crate::domain::entity::session::{Session, SessionRealm};
use crate::domain::repository::SessionRepository;

/// セッションをレルムと ID ごとのキー（`admin_session_<id>` / `member_session_<id>`）に保存する。
pub struct SessionJsonStoreRepository {
    store: JsonStore,
}

impl SessionJsonStoreRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }
}

impl SessionRepository for SessionJsonStoreRepository {
    fn load(&self, realm: SessionRealm, id: Uuid) -> Result<Option<Session>, StoreError> {
        self.store.load(&realm.storage_key(id))
    }

    fn save(&self, realm: SessionRealm, id: Uuid, session: &Session) -> Result<(), StoreError> {
        self.store.save(&realm.storage_key(id), session)
    }

    fn remove(&self, realm: SessionRealm, id: Uuid) -> Result<(), StoreError> {
        self.store.remove(&realm.storage_key(id)).map(|_| ())
    }
}
