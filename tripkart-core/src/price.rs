use serde::{Deserialize, Serialize};
use tripkart_shared::Paise;

/// Itemized monetary summary for a cart. Derived on every read; never stored
/// as authoritative truth independent of its inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base_fare: Paise,
    pub taxes_and_fees: Paise,
    pub convenience_fee: Paise,
    pub discount: Paise,
    pub subtotal: Paise,
    pub total_payable: Paise,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_label: Option<String>,
}

impl PriceBreakdown {
    pub fn zero() -> Self {
        Self {
            base_fare: 0,
            taxes_and_fees: 0,
            convenience_fee: 0,
            discount: 0,
            subtotal: 0,
            total_payable: 0,
            savings_label: None,
        }
    }
}
