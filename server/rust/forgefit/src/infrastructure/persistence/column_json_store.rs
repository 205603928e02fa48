use forgefit_kvstore::{JsonStore, StoreError};

use crate::domain::entity::column::Column;
use crate::domain::repository::ColumnRepository;

pub const COLUMNS_KEY: &str = "admin_columns";

/// カラム定義リストを `admin_columns` に 1 つの JSON 配列として保存する。
pub struct ColumnJsonStoreRepository {
    store: JsonStore,
}

impl ColumnJsonStoreRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }
}

impl ColumnRepository for ColumnJsonStoreRepository {
    fn load(&self) -> Result<Option<Vec<Column>>, StoreError> {
        self.store.load(COLUMNS_KEY)
    }

    fn save(&self, columns: &[Column]) -> Result<(), StoreError> {
        self.store.save(COLUMNS_KEY, columns)
    }
}
