pub mod checkout;
pub mod crud_users;
pub mod dashboard_stats;
pub mod export_users;
pub mod manage_columns;
pub mod member_programs;
pub mod session_guard;

pub use checkout::CheckoutUseCase;
pub use crud_users::CrudUsersUseCase;
pub use dashboard_stats::DashboardStatsUseCase;
pub use export_users::ExportUsersUseCase;
pub use manage_columns::ManageColumnsUseCase;
pub use member_programs::MemberProgramsUseCase;
pub use session_guard::SessionGuardUseCase;
