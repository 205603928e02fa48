pub mod auth_handler;
pub mod column_handler;
pub mod error;
pub mod member_handler;
pub mod public_handler;
pub mod user_handler;

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::adapter::handler::error::AppError;
use crate::adapter::middleware::session::{require_admin_session, require_member_session};
use crate::domain::entity::site::SiteInfo;
use crate::error::ServiceError;
use crate::usecase;

#[derive(Clone)]
pub struct AppState {
    pub admin_session_uc: Arc<usecase::SessionGuardUseCase>,
    pub member_session_uc: Arc<usecase::SessionGuardUseCase>,
    pub manage_columns_uc: Arc<usecase::ManageColumnsUseCase>,
    pub crud_users_uc: Arc<usecase::CrudUsersUseCase>,
    pub export_users_uc: Arc<usecase::ExportUsersUseCase>,
    pub dashboard_stats_uc: Arc<usecase::DashboardStatsUseCase>,
    pub checkout_uc: Arc<usecase::CheckoutUseCase>,
    pub member_programs_uc: Arc<usecase::MemberProgramsUseCase>,
    pub site: Arc<SiteInfo>,
    /// ユーザー一覧の既定ページサイズ。
    pub page_size: u32,
    /// 読み込み → 変更 → 保存の途中に別の書き込みが割り込まないよう、変更系リクエストを直列化する。
    pub write_gate: Arc<Mutex<()>>,
}

/// 削除系エンドポイントの確認パラメータ。
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// 同期のユースケース呼び出しをブロッキング用スレッドで実行する。ストアのファイル I/O を
/// 非同期ランタイムのワーカーから外すため、ストアに触るハンドラはこれを経由する。
pub async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!(error = %e, "blocking task failed");
            AppError::internal("SYS_FF_INTERNAL_ERROR", "Internal error")
        })?
        .map_err(AppError::from)
}

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/healthz", get(public_handler::healthz))
        .route("/api/v1/site", get(public_handler::site_info))
        .route("/api/v1/plans", get(public_handler::list_plans))
        .route("/api/v1/checkout/{plan}", get(public_handler::checkout))
        .route("/api/v1/admin/login", post(auth_handler::admin_login))
        .route("/api/v1/admin/logout", post(auth_handler::admin_logout))
        .route("/api/v1/admin/session", get(auth_handler::admin_session))
        .route("/api/v1/member/login", post(auth_handler::member_login))
        .route("/api/v1/member/logout", post(auth_handler::member_logout));

    let admin_routes = Router::new()
        .route("/api/v1/admin/stats", get(user_handler::stats))
        .route(
            "/api/v1/admin/columns",
            get(column_handler::list_columns).post(column_handler::create_column),
        )
        .route(
            "/api/v1/admin/columns/{id}",
            put(column_handler::update_column).delete(column_handler::delete_column),
        )
        .route(
            "/api/v1/admin/users",
            get(user_handler::list_users).post(user_handler::create_user),
        )
        .route("/api/v1/admin/users/template", get(user_handler::user_template))
        .route("/api/v1/admin/users/export", get(user_handler::export_users))
        .route(
            "/api/v1/admin/users/{id}",
            get(user_handler::get_user)
                .put(user_handler::update_user)
                .delete(user_handler::delete_user),
        )
        .route_layer(from_fn_with_state(state.clone(), require_admin_session));

    let member_routes = Router::new()
        .route("/api/v1/member/programs", get(member_handler::list_programs))
        .route(
            "/api/v1/member/programs/{id}/workouts",
            get(member_handler::list_workouts),
        )
        .route_layer(from_fn_with_state(state.clone(), require_member_session));

    public_routes
        .merge(admin_routes)
        .merge(member_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_run_blocking_returns_use_case_result() {
        let value = run_blocking(|| Ok::<_, ServiceError>(42)).await.unwrap();
        assert_eq!(value, 42);

        let err = run_blocking(|| Err::<(), _>(ServiceError::NotFound("user 9".to_string())))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_run_blocking_maps_panic_to_internal_error() {
        let err = run_blocking(|| -> Result<(), ServiceError> { panic!("boom") })
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "SYS_FF_INTERNAL_ERROR");
    }
}
