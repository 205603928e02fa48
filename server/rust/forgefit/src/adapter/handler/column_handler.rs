use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::{run_blocking, AppState, ConfirmQuery};
use crate::domain::entity::column::{Column, ColumnPatch, NewColumn};

pub async fn list_columns(State(state): State<AppState>) -> Result<Json<Vec<Column>>, AppError> {
    let uc = state.manage_columns_uc.clone();
    Ok(Json(run_blocking(move || uc.list_columns()).await?))
}

pub async fn create_column(
    State(state): State<AppState>,
    Json(input): Json<NewColumn>,
) -> Result<(StatusCode, Json<Column>), AppError> {
    let _gate = state.write_gate.lock().await;
    let uc = state.manage_columns_uc.clone();
    let column = run_blocking(move || uc.add_column(&input)).await?;
    Ok((StatusCode::CREATED, Json(column)))
}

/// 存在しないカラムの更新は何もせず 204 を返す。
pub async fn update_column(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ColumnPatch>,
) -> Result<Response, AppError> {
    let _gate = state.write_gate.lock().await;
    let uc = state.manage_columns_uc.clone();
    match run_blocking(move || uc.update_column(&id, &patch)).await? {
        Some(column) => Ok(Json(column).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

pub async fn delete_column(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> Result<StatusCode, AppError> {
    if !query.confirm {
        return Err(AppError::confirmation_required());
    }
    let _gate = state.write_gate.lock().await;
    let uc = state.manage_columns_uc.clone();
    run_blocking(move || uc.delete_column(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
