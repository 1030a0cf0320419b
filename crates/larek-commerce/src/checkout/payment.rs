//! Payment method.

use serde::{Deserialize, Serialize};

/// How the customer pays. There is no default: a method must be chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Paid online before delivery.
    #[serde(rename = "online")]
    Online,
    /// Paid on receipt.
    #[serde(rename = "cash")]
    OnDelivery,
}

impl PaymentMethod {
    /// All methods, in the order they are offered.
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::Online, PaymentMethod::OnDelivery];

    /// Wire name used by the order endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Online => "online",
            PaymentMethod::OnDelivery => "cash",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Online => "Онлайн",
            PaymentMethod::OnDelivery => "При получении",
        }
    }
}
