use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::{KeyValueStore, StoreError};

/// JsonStore は KeyValueStore 上で型付きの JSON ドキュメントを読み書きする。
#[derive(Clone)]
pub struct JsonStore {
    inner: Arc<dyn KeyValueStore>,
}

impl JsonStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    /// get は保存されている JSON 値を返す。
    /// JSON として解釈できない値は書かれていなかったものとして None を返す。
    pub fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        match self.load::<serde_json::Value>(key) {
            Err(StoreError::Corrupt { .. }) => Ok(None),
            other => other,
        }
    }

    /// load は保存されているドキュメントを T として読み出す。
    /// 解釈できないテキストや形の合わない値は StoreError::Corrupt になる。
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(text) = self.inner.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "stored document could not be parsed");
                Err(StoreError::Corrupt {
                    key: key.to_string(),
                })
            }
        }
    }

    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let text = serde_json::to_string(value)?;
        self.inner.set(key, &text)
    }

    pub fn remove(&self, key: &str) -> Result<bool, StoreError> {
        self.inner.remove(key)
    }
}
