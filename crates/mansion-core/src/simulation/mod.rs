pub mod kpis;
pub mod schedule;

use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{with_metadata, ComputationOutput};
use crate::MansionResult;

pub use kpis::{summarise_kpis, KpiSummary};
pub use schedule::{project_schedule, InvestmentData, SimulationYear, HORIZON_YEARS};

/// Schedule plus KPI summary for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub schedule: Vec<SimulationYear>,
    pub kpis: KpiSummary,
}

/// Run the full projection for a scenario: 30-year schedule, KPI summary,
/// and scenario-level warnings, wrapped in the standard output envelope.
pub fn run_simulation(
    input: &InvestmentData,
) -> MansionResult<ComputationOutput<SimulationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let schedule = project_schedule(input)?;
    let kpis = summarise_kpis(input, &schedule)?;

    if input.down_payment.is_zero() {
        warnings.push(
            "Down payment is zero — the purchase is fully loan-funded and the ROI divisor falls back to 1".into(),
        );
    }

    if input.down_payment > input.property_price {
        warnings.push(
            "Down payment exceeds the property price — treated as a fully cash-funded purchase"
                .into(),
        );
    }

    if schedule[0].cash_flow < Decimal::ZERO {
        warnings.push("First-year cash flow is negative — the property does not carry itself".into());
    }

    if input.loan_term as usize > HORIZON_YEARS {
        warnings.push(format!(
            "Loan term of {} years extends past the {HORIZON_YEARS}-year projection horizon",
            input.loan_term
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Fixed-Rate Amortization Projection (30-Year Horizon)",
        input,
        warnings,
        elapsed,
        SimulationOutput { schedule, kpis },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_envelope_carries_schedule_and_kpis() {
        let output = run_simulation(&InvestmentData::default()).unwrap();

        assert_eq!(output.result.schedule.len(), HORIZON_YEARS);
        assert_eq!(
            output.methodology,
            "Fixed-Rate Amortization Projection (30-Year Horizon)"
        );
    }

    #[test]
    fn test_long_term_warning() {
        // Default scenario runs a 35-year loan against the 30-year horizon.
        let output = run_simulation(&InvestmentData::default()).unwrap();
        assert!(output
            .warnings
            .iter()
            .any(|w| w.contains("projection horizon")));
    }

    #[test]
    fn test_full_loan_warning() {
        let mut input = InvestmentData::default();
        input.down_payment = Decimal::ZERO;

        let output = run_simulation(&input).unwrap();
        assert!(output.warnings.iter().any(|w| w.contains("fully loan-funded")));
    }

    #[test]
    fn test_negative_cash_flow_warning() {
        let mut input = InvestmentData::default();
        input.monthly_rent = dec!(150_000);

        let output = run_simulation(&input).unwrap();
        assert!(output
            .warnings
            .iter()
            .any(|w| w.contains("First-year cash flow is negative")));
    }
}
