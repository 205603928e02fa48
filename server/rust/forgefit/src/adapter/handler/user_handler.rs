use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::{run_blocking, AppState, ConfirmQuery};
use crate::domain::entity::user_record::UserRecord;
use crate::domain::service::form_validator::FormValues;
use crate::usecase::crud_users::UserListing;
use crate::usecase::dashboard_stats::DashboardStats;

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// JSON オブジェクトをフォームの値に変換する。スカラー値は文字列表現に、null は空文字列にする。
fn form_values(body: Map<String, Value>) -> Result<FormValues, AppError> {
    body.into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(AppError::bad_request(
                        "SYS_FF_INVALID_INPUT",
                        &format!("field '{key}' must be a scalar value"),
                    ));
                }
            };
            Ok((key, text))
        })
        .collect()
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let uc = state.dashboard_stats_uc.clone();
    Ok(Json(run_blocking(move || uc.execute()).await?))
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UserListing>, AppError> {
    let uc = state.crud_users_uc.clone();
    let search = query.search.unwrap_or_default();
    let page = query.page.unwrap_or(1);
    let per_page = query.page_size.unwrap_or(state.page_size);
    let listing = run_blocking(move || uc.list_users(&search, page, per_page)).await?;
    Ok(Json(listing))
}

pub async fn user_template(State(state): State<AppState>) -> Result<Json<FormValues>, AppError> {
    let uc = state.crud_users_uc.clone();
    Ok(Json(run_blocking(move || uc.new_user_template()).await?))
}

/// 全ユーザーを JSON ファイルとしてダウンロードさせる。
pub async fn export_users(State(state): State<AppState>) -> Result<Response, AppError> {
    let uc = state.export_users_uc.clone();
    let artifact = run_blocking(move || uc.execute()).await?;
    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.body,
    )
        .into_response())
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserRecord>, AppError> {
    let uc = state.crud_users_uc.clone();
    Ok(Json(run_blocking(move || uc.get_user(&id)).await?))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<UserRecord>), AppError> {
    let values = form_values(body)?;
    let _gate = state.write_gate.lock().await;
    let uc = state.crud_users_uc.clone();
    let record = run_blocking(move || uc.create_user(&values)).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// 存在しないユーザーの更新は何もせず 204 を返す。
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Response, AppError> {
    let values = form_values(body)?;
    let _gate = state.write_gate.lock().await;
    let uc = state.crud_users_uc.clone();
    match run_blocking(move || uc.update_user(&id, &values)).await? {
        Some(record) => Ok(Json(record).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> Result<StatusCode, AppError> {
    if !query.confirm {
        return Err(AppError::confirmation_required());
    }
    let _gate = state.write_gate.lock().await;
    let uc = state.crud_users_uc.clone();
    run_blocking(move || uc.delete_user(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
