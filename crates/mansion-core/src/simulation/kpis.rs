use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MansionError;
use crate::simulation::schedule::{InvestmentData, SimulationYear};
use crate::types::Rate;
use crate::MansionResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Headline figures for the scenario, recomputed alongside every schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Gross annual rent over property price, as a percentage
    pub surface_yield: Rate,
    /// Annual rent net of recurring costs over property price, as a percentage
    pub net_yield: Rate,
    /// First-year cash flow in units of ten thousand yen, floored
    pub annual_cash_flow_man: Decimal,
    /// First-year cash flow over the down payment, as a percentage.
    /// A zero down payment substitutes a divisor of one so the figure stays
    /// finite; it is a display convention, not a return on nothing.
    pub roi: Rate,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the KPI summary from a scenario and its projected schedule.
///
/// Pure function of its two arguments. The schedule is expected to come from
/// [`project_schedule`](crate::simulation::project_schedule) for the same
/// scenario; the pairing is not verified here.
pub fn summarise_kpis(
    input: &InvestmentData,
    schedule: &[SimulationYear],
) -> MansionResult<KpiSummary> {
    if schedule.is_empty() {
        return Err(MansionError::InvalidInput {
            field: "schedule".into(),
            reason: "KPI summary requires at least one projected year".into(),
        });
    }

    if input.property_price <= Decimal::ZERO {
        return Err(MansionError::DivisionByZero {
            context: "yield denominators (property_price)".into(),
        });
    }

    let annual_rent = input.monthly_rent * dec!(12);
    let annual_fixed_costs = (input.management_fee + input.repair_reserve) * dec!(12);

    let surface_yield = annual_rent / input.property_price * dec!(100);
    let net_yield = (annual_rent - annual_fixed_costs) / input.property_price * dec!(100);

    let first_year_cash_flow = schedule[0].cash_flow;
    let annual_cash_flow_man = (first_year_cash_flow / dec!(10_000)).floor();

    let roi_divisor = if input.down_payment.is_zero() {
        Decimal::ONE
    } else {
        input.down_payment
    };
    let roi = first_year_cash_flow / roi_divisor * dec!(100);

    Ok(KpiSummary {
        surface_yield,
        net_yield,
        annual_cash_flow_man,
        roi,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::schedule::project_schedule;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    /// Cash-funded scenario with round figures so every ratio is exact.
    fn cash_input() -> InvestmentData {
        InvestmentData {
            property_price: dec!(50_000_000),
            down_payment: dec!(50_000_000),
            loan_term: 30,
            interest_rate: dec!(1.0),
            monthly_rent: dec!(200_000),
            management_fee: dec!(10_000),
            repair_reserve: dec!(10_000),
            tax_rate: dec!(1.0),
        }
    }

    #[test]
    fn test_surface_and_net_yield() {
        let input = cash_input();
        let schedule = project_schedule(&input).unwrap();
        let kpis = summarise_kpis(&input, &schedule).unwrap();

        // 2,400,000 / 50,000,000 = 4.8%
        assert_eq!(kpis.surface_yield, dec!(4.8));
        // (2,400,000 - 240,000) / 50,000,000 = 4.32%
        assert_eq!(kpis.net_yield, dec!(4.32));
    }

    #[test]
    fn test_annual_cash_flow_in_man_yen() {
        let input = cash_input();
        let schedule = project_schedule(&input).unwrap();
        let kpis = summarise_kpis(&input, &schedule).unwrap();

        // (200,000 - 20,000) * 12 = 2,160,000 yen = 216 man-yen
        assert_eq!(kpis.annual_cash_flow_man, dec!(216));
    }

    #[test]
    fn test_roi_against_down_payment() {
        let input = cash_input();
        let schedule = project_schedule(&input).unwrap();
        let kpis = summarise_kpis(&input, &schedule).unwrap();

        // 2,160,000 / 50,000,000 = 4.32%
        assert_eq!(kpis.roi, dec!(4.32));
    }

    #[test]
    fn test_roi_zero_down_payment_uses_divisor_of_one() {
        let mut input = cash_input();
        input.down_payment = Decimal::ZERO;

        let schedule = project_schedule(&input).unwrap();
        let kpis = summarise_kpis(&input, &schedule).unwrap();

        // Finite, enormous, and exactly cash_flow * 100.
        assert_eq!(kpis.roi, schedule[0].cash_flow * dec!(100));
    }

    #[test]
    fn test_empty_schedule_rejected() {
        let input = cash_input();
        let result = summarise_kpis(&input, &[]);

        match result.unwrap_err() {
            MansionError::InvalidInput { field, .. } => assert_eq!(field, "schedule"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_kpis_deterministic() {
        let input = InvestmentData::default();
        let schedule = project_schedule(&input).unwrap();

        let first = summarise_kpis(&input, &schedule).unwrap();
        let second = summarise_kpis(&input, &schedule).unwrap();
        assert_eq!(first, second);
    }
}
