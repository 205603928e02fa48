use std::sync::Arc;

use forgefit_validation::{validate_required, FieldErrors};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entity::column::{
    is_default_column_id, Column, ColumnPatch, FieldType, NewColumn, NEW_COLUMN_NAME,
};
use crate::domain::repository::{ColumnRepository, UserRepository};
use crate::domain::service::user_query;
use crate::error::ServiceError;
use crate::usecase::crud_users::load_records;

/// load_columns はカラム定義を読み出す。
///
/// 未保存なら既定カラムを保存して返す。保存内容が壊れていれば既定カラムを返す（保存はしない）。
pub(crate) fn load_columns(repo: &dyn ColumnRepository) -> Result<Vec<Column>, ServiceError> {
    match repo.load() {
        Ok(Some(columns)) => Ok(columns),
        Ok(None) => {
            let columns = Column::default_columns();
            repo.save(&columns)?;
            info!(count = columns.len(), "seeded default columns");
            Ok(columns)
        }
        Err(e) if e.is_corrupt() => {
            warn!("column registry is unreadable; using default columns");
            Ok(Column::default_columns())
        }
        Err(e) => Err(e.into()),
    }
}

fn validate_column_name(name: &str) -> Result<(), ServiceError> {
    if let Err(e) = validate_required(Some(name), "Name") {
        let mut errors = FieldErrors::new();
        errors.add("name", e);
        return Err(errors.into());
    }
    Ok(())
}

/// ManageColumnsUseCase はユーザー一覧のカラム定義を管理する。
pub struct ManageColumnsUseCase {
    column_repo: Arc<dyn ColumnRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl ManageColumnsUseCase {
    pub fn new(column_repo: Arc<dyn ColumnRepository>, user_repo: Arc<dyn UserRepository>) -> Self {
        Self {
            column_repo,
            user_repo,
        }
    }

    pub fn list_columns(&self) -> Result<Vec<Column>, ServiceError> {
        load_columns(self.column_repo.as_ref())
    }

    /// カラムを末尾に追加する。ID は新しく採番する。
    pub fn add_column(&self, input: &NewColumn) -> Result<Column, ServiceError> {
        let name = match input.name.as_deref() {
            Some(name) => {
                validate_column_name(name)?;
                name.trim().to_string()
            }
            None => NEW_COLUMN_NAME.to_string(),
        };

        let mut columns = self.list_columns()?;
        let mut id = Uuid::new_v4().to_string();
        while columns.iter().any(|c| c.id == id) {
            id = Uuid::new_v4().to_string();
        }

        let mut column = Column {
            id,
            name,
            field_type: input.field_type.unwrap_or(FieldType::Text),
            required: input.required.unwrap_or(false),
            options: input.options.as_ref().map(|o| o.to_list()),
        };
        column.normalize_options();

        columns.push(column.clone());
        self.column_repo.save(&columns)?;
        info!(column_id = %column.id, field_type = %column.field_type, "column added");
        Ok(column)
    }

    /// カラム定義を更新する。該当カラムが無ければ何もせず None を返す。
    pub fn update_column(&self, id: &str, patch: &ColumnPatch) -> Result<Option<Column>, ServiceError> {
        if let Some(name) = patch.name.as_deref() {
            validate_column_name(name)?;
        }

        let mut columns = self.list_columns()?;
        let Some(current) = columns.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if current.is_default() && patch.changes_protected_attributes(current) {
            warn!(column_id = id, "rejected type/required change on default column");
            return Err(ServiceError::Protected(id.to_string()));
        }

        let next = current.merged(patch);
        *current = next.clone();
        self.column_repo.save(&columns)?;
        info!(column_id = id, "column updated");
        Ok(Some(next))
    }

    /// カラムを削除し、全ユーザーからそのカラムの値を取り除く。
    /// 該当カラムが無ければ false。既定カラムは削除できない。
    pub fn delete_column(&self, id: &str) -> Result<bool, ServiceError> {
        if is_default_column_id(id) {
            warn!(column_id = id, "rejected deletion of default column");
            return Err(ServiceError::Protected(id.to_string()));
        }

        let mut columns = self.list_columns()?;
        let before = columns.len();
        columns.retain(|c| c.id != id);
        if columns.len() == before {
            return Ok(false);
        }
        self.column_repo.save(&columns)?;

        let mut records = load_records(self.user_repo.as_ref(), &columns)?;
        let stripped = user_query::strip_field(&mut records, id);
        if stripped > 0 {
            self.user_repo.save(&records)?;
        }
        info!(column_id = id, stripped, "column deleted");
        Ok(true)
    }
}
