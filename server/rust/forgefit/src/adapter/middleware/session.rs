use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::{run_blocking, AppState};
use crate::domain::entity::session::{Session, SessionStatus};
use crate::usecase::SessionGuardUseCase;

/// Authorization ヘッダーの Bearer トークンをセッション ID として取り出す。
/// ヘッダーが無い・形式が違う・UUID でない場合は None を返す。
pub fn extract_session_id(headers: &HeaderMap) -> Option<Uuid> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    Uuid::parse_str(token.trim()).ok()
}

/// 呼び出し元のセッションを確認し、有効ならその内容を返す。
pub async fn current_session(
    uc: &Arc<SessionGuardUseCase>,
    headers: &HeaderMap,
) -> Result<Session, AppError> {
    let Some(id) = extract_session_id(headers) else {
        return Err(AppError::session_required(uc.realm()));
    };
    let checker = Arc::clone(uc);
    match run_blocking(move || checker.check(id)).await? {
        SessionStatus::Valid(session) => Ok(session),
        SessionStatus::Expired | SessionStatus::Absent => Err(AppError::session_required(uc.realm())),
    }
}

/// 管理者セッションが有効なときだけ後続のハンドラへ進める。
pub async fn require_admin_session(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    guard(&state.admin_session_uc, req, next).await
}

/// 会員セッションが有効なときだけ後続のハンドラへ進める。
pub async fn require_member_session(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    guard(&state.member_session_uc, req, next).await
}

async fn guard(
    uc: &Arc<SessionGuardUseCase>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let session = current_session(uc, req.headers()).await?;
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
