use crate::domain::entity::plan::{CheckoutView, Plan};
use crate::error::ServiceError;

/// CheckoutUseCase は販売中のプランと、外部チェックアウトへ渡す情報を返す。
pub struct CheckoutUseCase {
    plans: Vec<Plan>,
}

impl CheckoutUseCase {
    pub fn new(plans: Vec<Plan>) -> Self {
        Self { plans }
    }

    pub fn list_plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn checkout(&self, plan_id: &str) -> Result<CheckoutView, ServiceError> {
        self.plans
            .iter()
            .find(|p| p.id == plan_id)
            .map(CheckoutView::for_plan)
            .ok_or_else(|| ServiceError::PlanNotFound(plan_id.to_string()))
    }
}
