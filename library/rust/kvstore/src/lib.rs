//! ローカルのキー・バリューストア。
//!
//! 値は JSON テキストとして保存され、キーごとに独立したドキュメントになる。
//! トランザクション・バージョニング・マイグレーションは持たない。

pub mod client;
pub mod error;
pub mod file;
pub mod json;
pub mod memory;

pub use client::{validate_key, KeyValueStore};
pub use error::StoreError;
pub use file::FileKeyValueStore;
pub use json::JsonStore;
pub use memory::InMemoryKeyValueStore;

#[cfg(any(test, feature = "mock"))]
pub use client::MockKeyValueStore;
