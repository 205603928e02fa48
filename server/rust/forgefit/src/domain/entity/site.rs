use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteInfo {
    pub name: String,
    pub description: String,
    pub contact: ContactInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub business_hours: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "ForgeFit Club".to_string(),
            description:
                "Transform your body, forge your strength. Join the ultimate fitness community."
                    .to_string(),
            contact: ContactInfo::default(),
        }
    }
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            address: "2150 N Central Expressway, Suite 200, Dallas, TX 75206".to_string(),
            phone: "(214) 555-0147".to_string(),
            email: "support@forgefitclub.com".to_string(),
            business_hours: "Monday - Friday: 6:00 AM - 10:00 PM CST".to_string(),
        }
    }
}
