use std::sync::Arc;

use forgefit_kvstore::{JsonStore, KeyValueStore};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::adapter::handler::AppState;
use crate::domain::entity::session::SessionRealm;
use crate::domain::repository::{ColumnRepository, SessionRepository, UserRepository};
use crate::infrastructure::config::Config;
use crate::infrastructure::persistence::{
    ColumnJsonStoreRepository, SessionJsonStoreRepository, UserJsonStoreRepository,
};
use crate::usecase::session_guard::Credentials;
use crate::usecase::{
    CheckoutUseCase, CrudUsersUseCase, DashboardStatsUseCase, ExportUsersUseCase,
    ManageColumnsUseCase, MemberProgramsUseCase, SessionGuardUseCase,
};

/// build_state はストアの上にリポジトリとユースケースを組み立てる。
/// カラム定義が未保存なら既定カラムをここで保存する。
pub fn build_state(cfg: &Config, store: Arc<dyn KeyValueStore>) -> anyhow::Result<AppState> {
    let json = JsonStore::new(store);
    let column_repo: Arc<dyn ColumnRepository> =
        Arc::new(ColumnJsonStoreRepository::new(json.clone()));
    let user_repo: Arc<dyn UserRepository> = Arc::new(UserJsonStoreRepository::new(json.clone()));
    let session_repo: Arc<dyn SessionRepository> = Arc::new(SessionJsonStoreRepository::new(json));

    let admin_credentials = cfg
        .auth
        .admin
        .as_ref()
        .map(|a| Credentials::new(a.username.clone(), a.password.clone()));
    let member_credentials = cfg
        .auth
        .member
        .as_ref()
        .map(|m| Credentials::new(m.email.clone(), m.password.clone()));
    if admin_credentials.is_none() {
        warn!("admin credentials are not configured; admin login is disabled");
    }
    if member_credentials.is_none() {
        warn!("member credentials are not configured; member login is disabled");
    }

    let ttl_millis = cfg.session.ttl_millis();
    let admin_session_uc = Arc::new(SessionGuardUseCase::new(
        session_repo.clone(),
        SessionRealm::Admin,
        admin_credentials,
        ttl_millis,
    ));
    let member_session_uc = Arc::new(SessionGuardUseCase::new(
        session_repo,
        SessionRealm::Member,
        member_credentials,
        ttl_millis,
    ));

    let manage_columns_uc = Arc::new(ManageColumnsUseCase::new(
        column_repo.clone(),
        user_repo.clone(),
    ));
    let crud_users_uc = Arc::new(CrudUsersUseCase::new(column_repo, user_repo));
    let export_users_uc = Arc::new(ExportUsersUseCase::new(crud_users_uc.clone()));
    let dashboard_stats_uc = Arc::new(DashboardStatsUseCase::new(
        manage_columns_uc.clone(),
        crud_users_uc.clone(),
    ));

    let columns = manage_columns_uc.list_columns()?;
    info!(columns = columns.len(), "column registry ready");

    Ok(AppState {
        admin_session_uc,
        member_session_uc,
        manage_columns_uc,
        crud_users_uc,
        export_users_uc,
        dashboard_stats_uc,
        checkout_uc: Arc::new(CheckoutUseCase::new(vec![cfg.plan.clone()])),
        member_programs_uc: Arc::new(MemberProgramsUseCase::new()),
        site: Arc::new(cfg.site.clone()),
        page_size: cfg.admin.page_size,
        write_gate: Arc::new(Mutex::new(())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use forgefit_kvstore::InMemoryKeyValueStore;

    #[test]
    fn test_build_state_seeds_default_columns() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let cfg = Config::parse("app:\n  name: forgefit-server\n").unwrap();
        let state = build_state(&cfg, store.clone()).unwrap();

        assert!(store.get("admin_columns").unwrap().is_some());
        assert_eq!(state.manage_columns_uc.list_columns().unwrap().len(), 4);
        assert_eq!(state.page_size, 10);
    }
}
