use serde::{Deserialize, Serialize};

/// チェックアウト画面に表示する特典の数。
pub const CHECKOUT_FEATURE_COUNT: usize = 6;

/// Plan は販売中の会員プラン。決済は外部のチェックアウトウィジェットに委ねる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    /// 米ドル（整数）。
    pub price: u32,
    pub product_id: String,
    pub features: Vec<String>,
    #[serde(default)]
    pub popular: bool,
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            id: "pro".to_string(),
            name: "ForgeFit Pro".to_string(),
            price: 199,
            product_id: "plan_9kGNVSemYqrgU".to_string(),
            features: [
                "Unlimited access to all workout programs",
                "Personalized nutrition plans",
                "24/7 community support",
                "Live coaching sessions",
                "Progress tracking & analytics",
                "Mobile app access",
                "Exclusive member content",
                "Priority customer support",
            ]
            .into_iter()
            .map(ToString::to_string)
            .collect(),
            popular: true,
        }
    }
}

/// CheckoutView は外部チェックアウトウィジェットへ渡す情報。
/// 決済完了後にこちらのデータへ戻ってくる情報は無い。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutView {
    pub plan_id: String,
    pub plan_name: String,
    pub price: u32,
    pub product_id: String,
    pub features: Vec<String>,
    pub theme: String,
    pub success_path: String,
}

impl CheckoutView {
    pub fn for_plan(plan: &Plan) -> Self {
        Self {
            plan_id: plan.id.clone(),
            plan_name: plan.name.clone(),
            price: plan.price,
            product_id: plan.product_id.clone(),
            features: plan
                .features
                .iter()
                .take(CHECKOUT_FEATURE_COUNT)
                .cloned()
                .collect(),
            theme: "dark".to_string(),
            success_path: "/login".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan() {
        let plan = Plan::default();
        assert_eq!(plan.id, "pro");
        assert_eq!(plan.price, 199);
        assert_eq!(plan.features.len(), 8);
    }

    #[test]
    fn test_checkout_view_limits_features() {
        let view = CheckoutView::for_plan(&Plan::default());
        assert_eq!(view.features.len(), CHECKOUT_FEATURE_COUNT);
        assert_eq!(view.success_path, "/login");
        assert_eq!(view.product_id, "plan_9kGNVSemYqrgU");
    }
}
