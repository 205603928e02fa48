use std::sync::Arc;

use tracing::info;

use crate::error::ServiceError;
use crate::usecase::crud_users::CrudUsersUseCase;

pub const EXPORT_FILE_NAME: &str = "forgefit-users.json";

/// ダウンロード用に書き出したユーザー一覧。
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

/// ExportUsersUseCase は全ユーザーを整形済み JSON 配列として書き出す。
/// 検索・ページングの状態には関係なく常に全件を対象にする。
pub struct ExportUsersUseCase {
    users: Arc<CrudUsersUseCase>,
}

impl ExportUsersUseCase {
    pub fn new(users: Arc<CrudUsersUseCase>) -> Self {
        Self { users }
    }

    pub fn execute(&self) -> Result<ExportArtifact, ServiceError> {
        let records = self.users.all_users()?;
        let body = serde_json::to_string_pretty(&records)?;
        info!(count = records.len(), "users exported");
        Ok(ExportArtifact {
            file_name: EXPORT_FILE_NAME,
            content_type: "application/json",
            body,
        })
    }
}
