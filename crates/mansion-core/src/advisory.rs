use serde::{Deserialize, Serialize};

use crate::simulation::InvestmentData;
use crate::types::{Money, Rate};

/// The slice of a scenario shared with external advisory services.
///
/// Prompt construction sees this projection and nothing else; recurring-cost
/// and tax fields stay inside the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceContext {
    pub property_price: Money,
    pub down_payment: Money,
    pub interest_rate: Rate,
    pub loan_term: u32,
    pub monthly_rent: Money,
}

impl From<&InvestmentData> for AdviceContext {
    fn from(data: &InvestmentData) -> Self {
        Self {
            property_price: data.property_price,
            down_payment: data.down_payment,
            interest_rate: data.interest_rate,
            loan_term: data.loan_term,
            monthly_rent: data.monthly_rent,
        }
    }
}
