use forgefit_kvstore::StoreError;
use uuid::Uuid;

use crate::domain::entity::session::{Session, SessionRealm};

#[cfg_attr(test, mockall::automock)]
pub trait SessionRepository: Send + Sync {
    fn load(&self, realm: SessionRealm, id: Uuid) -> Result<Option<Session>, StoreError>;
    fn save(&self, realm: SessionRealm, id: Uuid, session: &Session) -> Result<(), StoreError>;
    fn remove(&self, realm: SessionRealm, id: Uuid) -> Result<(), StoreError>;
}
