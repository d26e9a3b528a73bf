//! Payment gateway types

use serde::{Deserialize, Serialize};

/// Order creation request sent to the payment provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Amount in the currency's minor unit
    pub amount: i64,

    /// ISO currency code, e.g. `INR`
    pub currency: String,

    /// Application reference; carries the appointment id
    pub receipt: String,
}

/// Order as issued by the payment provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOrder {
    /// Provider order id
    pub id: String,

    pub amount: i64,

    pub currency: String,

    pub receipt: Option<String>,

    /// Provider-reported order status (`created`, `attempted`, `paid`)
    #[serde(default)]
    pub status: String,
}

/// Values returned by the checkout flow after the user pays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}
