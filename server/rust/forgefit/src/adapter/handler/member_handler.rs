use axum::{
    extract::{Path, State},
    Json,
};

use crate::adapter::handler::AppState;
use crate::domain::entity::program::{Program, Workout};

pub async fn list_programs(State(state): State<AppState>) -> Json<Vec<Program>> {
    Json(state.member_programs_uc.list_programs())
}

pub async fn list_workouts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<Workout>> {
    Json(state.member_programs_uc.workouts(&id))
}
