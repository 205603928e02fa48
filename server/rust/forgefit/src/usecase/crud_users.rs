use std::sync::Arc;

use forgefit_pagination::{paginate, validate_per_page, PageRequest, PageResponse};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entity::column::Column;
use crate::domain::entity::user_record::UserRecord;
use crate::domain::repository::{ColumnRepository, UserRepository};
use crate::domain::service::form_validator::{build_fields, validate_record, FormValues};
use crate::domain::service::user_query;
use crate::error::ServiceError;
use crate::usecase::manage_columns::load_columns;

/// load_records はユーザー一覧を読み出し、値の型をカラム定義に合わせる。
/// 未保存または保存内容が壊れている場合は空の一覧になる。
pub(crate) fn load_records(
    repo: &dyn UserRepository,
    columns: &[Column],
) -> Result<Vec<UserRecord>, ServiceError> {
    let mut records = match repo.load() {
        Ok(Some(records)) => records,
        Ok(None) => Vec::new(),
        Err(e) if e.is_corrupt() => {
            warn!("user list is unreadable; starting from an empty list");
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };
    for record in &mut records {
        record.conform(columns);
    }
    Ok(records)
}

/// 一覧画面に返す 1 ページ分のユーザー。
#[derive(Debug, Clone, Serialize)]
pub struct UserListing {
    pub columns: Vec<Column>,
    #[serde(flatten)]
    pub page: PageResponse<UserRecord>,
    /// 「Showing X to Y of Z」の X と Y。該当が無ければ None。
    pub showing: Option<(u64, u64)>,
    /// Previous / Next ボタンを押せるか。
    pub has_previous: bool,
    pub has_next: bool,
}

/// CrudUsersUseCase は管理画面のユーザー一覧の追加・更新・削除・検索を扱う。
pub struct CrudUsersUseCase {
    column_repo: Arc<dyn ColumnRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl CrudUsersUseCase {
    pub fn new(column_repo: Arc<dyn ColumnRepository>, user_repo: Arc<dyn UserRepository>) -> Self {
        Self {
            column_repo,
            user_repo,
        }
    }

    fn columns(&self) -> Result<Vec<Column>, ServiceError> {
        load_columns(self.column_repo.as_ref())
    }

    pub fn all_users(&self) -> Result<Vec<UserRecord>, ServiceError> {
        let columns = self.columns()?;
        load_records(self.user_repo.as_ref(), &columns)
    }

    /// 検索語で絞り込んだうえで page ページ目を返す。
    /// page は 1 から総ページ数の範囲に丸める。
    pub fn list_users(&self, search: &str, page: u32, per_page: u32) -> Result<UserListing, ServiceError> {
        validate_per_page(per_page)?;
        let columns = self.columns()?;
        let records = load_records(self.user_repo.as_ref(), &columns)?;
        let filtered = user_query::search(records, search);

        let total_pages = u32::try_from(filtered.len().div_ceil(per_page as usize))
            .unwrap_or(u32::MAX)
            .max(1);
        let request = PageRequest::new(page.clamp(1, total_pages), per_page)?;
        let page = paginate(filtered, &request);
        let showing = page.showing_range();
        let has_previous = page.has_previous();
        let has_next = page.has_next();
        Ok(UserListing {
            columns,
            page,
            showing,
            has_previous,
            has_next,
        })
    }

    pub fn get_user(&self, id: &str) -> Result<UserRecord, ServiceError> {
        self.all_users()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("user {id}")))
    }

    /// 追加フォームの初期値。select は先頭の選択肢、それ以外は空文字列。
    pub fn new_user_template(&self) -> Result<FormValues, ServiceError> {
        Ok(self
            .columns()?
            .iter()
            .map(|c| (c.id.clone(), c.initial_value()))
            .collect())
    }

    pub fn create_user(&self, values: &FormValues) -> Result<UserRecord, ServiceError> {
        let columns = self.columns()?;
        validate_record(&columns, values).into_result()?;

        let mut records = load_records(self.user_repo.as_ref(), &columns)?;
        let mut id = Uuid::new_v4().to_string();
        while records.iter().any(|r| r.id == id) {
            id = Uuid::new_v4().to_string();
        }
        let record = UserRecord::new(id, build_fields(&columns, values));
        records.push(record.clone());
        self.user_repo.save(&records)?;
        info!(user_id = %record.id, "user added");
        Ok(record)
    }

    /// ID を保ったままユーザーの値を置き換える。該当ユーザーが無ければ何もせず None。
    pub fn update_user(&self, id: &str, values: &FormValues) -> Result<Option<UserRecord>, ServiceError> {
        let columns = self.columns()?;
        validate_record(&columns, values).into_result()?;

        let mut records = load_records(self.user_repo.as_ref(), &columns)?;
        let Some(target) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        target.fields = build_fields(&columns, values);
        let updated = target.clone();
        self.user_repo.save(&records)?;
        info!(user_id = id, "user updated");
        Ok(Some(updated))
    }

    /// ユーザーを削除する。該当ユーザーが無ければ false。
    pub fn delete_user(&self, id: &str) -> Result<bool, ServiceError> {
        let columns = self.columns()?;
        let mut records = load_records(self.user_repo.as_ref(), &columns)?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.user_repo.save(&records)?;
        info!(user_id = id, "user deleted");
        Ok(true)
    }
}
