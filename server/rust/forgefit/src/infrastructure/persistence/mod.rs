pub mod column_json_store;
pub mod session_json_store;
pub mod user_json_store;

pub use column_json_store::ColumnJsonStoreRepository;
pub use session_json_store::SessionJsonStoreRepository;
pub use user_json_store::UserJsonStoreRepository;
