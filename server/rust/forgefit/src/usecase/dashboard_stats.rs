use std::sync::Arc;

use serde::Serialize;

use crate::domain::service::user_query;
use crate::error::ServiceError;
use crate::usecase::crud_users::CrudUsersUseCase;
use crate::usecase::manage_columns::ManageColumnsUseCase;

/// 管理画面上部に表示する集計値。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_users: usize,
    pub active_members: usize,
    pub data_columns: usize,
}

pub struct DashboardStatsUseCase {
    columns: Arc<ManageColumnsUseCase>,
    users: Arc<CrudUsersUseCase>,
}

impl DashboardStatsUseCase {
    pub fn new(columns: Arc<ManageColumnsUseCase>, users: Arc<CrudUsersUseCase>) -> Self {
        Self { columns, users }
    }

    pub fn execute(&self) -> Result<DashboardStats, ServiceError> {
        let records = self.users.all_users()?;
        Ok(DashboardStats {
            total_users: records.len(),
            active_members: user_query::count_with_status(&records, "Active"),
            data_columns: self.columns.list_columns()?.len(),
        })
    }
}
