use axum::{
    extract::{Path, State},
    Json,
};

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::AppState;
use crate::domain::entity::plan::{CheckoutView, Plan};
use crate::domain::entity::site::SiteInfo;

pub async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn site_info(State(state): State<AppState>) -> Json<SiteInfo> {
    Json(state.site.as_ref().clone())
}

pub async fn list_plans(State(state): State<AppState>) -> Json<Vec<Plan>> {
    Json(state.checkout_uc.list_plans().to_vec())
}

pub async fn checkout(
    State(state): State<AppState>,
    Path(plan): Path<String>,
) -> Result<Json<CheckoutView>, AppError> {
    Ok(Json(state.checkout_uc.checkout(&plan)?))
}
