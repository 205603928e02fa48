use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::{run_blocking, AppState};
use crate::adapter::middleware::session::{current_session, extract_session_id};
use crate::adapter::presenter::response::{LoginResponse, SessionResponse};
use crate::usecase::session_guard::LoginInput;
use crate::usecase::SessionGuardUseCase;

async fn login(
    uc: &Arc<SessionGuardUseCase>,
    input: LoginInput,
) -> Result<Json<LoginResponse>, AppError> {
    let realm = uc.realm();
    let guard = Arc::clone(uc);
    let issued = run_blocking(move || guard.login(&input)).await?;
    Ok(Json(LoginResponse::new(realm, &issued)))
}

/// 呼び出し元のセッションだけを削除する。ID が無ければ何もしない。
async fn logout(uc: &Arc<SessionGuardUseCase>, headers: &HeaderMap) -> Result<StatusCode, AppError> {
    if let Some(id) = extract_session_id(headers) {
        let guard = Arc::clone(uc);
        run_blocking(move || guard.logout(id)).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn admin_login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<LoginResponse>, AppError> {
    login(&state.admin_session_uc, input).await
}

pub async fn admin_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    logout(&state.admin_session_uc, &headers).await
}

/// 管理画面の表示前に呼ばれるセッション確認。
pub async fn admin_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, AppError> {
    let uc = &state.admin_session_uc;
    let session = current_session(uc, &headers).await?;
    Ok(Json(SessionResponse::new(uc.realm(), &session)))
}

pub async fn member_login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<LoginResponse>, AppError> {
    login(&state.member_session_uc, input).await
}

pub async fn member_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    logout(&state.member_session_uc, &headers).await
}
