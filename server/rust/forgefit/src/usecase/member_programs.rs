use crate::domain::entity::program::{program_catalog, workouts_for, Program, Workout};

/// 会員ダッシュボードのプログラム一覧とワークアウト一覧。
#[derive(Debug, Default)]
pub struct MemberProgramsUseCase;

impl MemberProgramsUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn list_programs(&self) -> Vec<Program> {
        program_catalog()
    }

    /// ロックされたプログラムのワークアウトは返さない。
    pub fn workouts(&self, program_id: &str) -> Vec<Workout> {
        let locked = program_catalog()
            .iter()
            .any(|p| p.id == program_id && p.locked);
        if locked {
            return Vec::new();
        }
        workouts_for(program_id)
    }
}
