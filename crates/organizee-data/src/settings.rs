use serde::{Deserialize, Serialize};

/// Fixed organization-wide amounts and the protected admin id.
/// Injected into handlers so deployments and tests can vary them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub one_time_fee_amount: i64,
    pub monthly_dues_amount: i64,
    pub bootstrap_admin_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            one_time_fee_amount: 50000,
            monthly_dues_amount: 20000,
            bootstrap_admin_id: "1".to_string(),
        }
    }
}

impl Settings {

    // Check if an id is the protected bootstrap admin
    pub fn is_bootstrap_admin(&self, member_id: &str) -> bool {
        member_id == self.bootstrap_admin_id
    }
}
