use serde::{Deserialize, Serialize};

/// Payment status as shown to members: "Lunas" means settled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "Lunas")]
    Paid,
    #[default]
    #[serde(rename = "Belum Lunas")]
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "Lunas",
            Self::Unpaid => "Belum Lunas",
        }
    }
}
