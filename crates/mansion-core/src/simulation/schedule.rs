use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MansionError;
use crate::types::{Money, Rate};
use crate::MansionResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Number of years every projection spans, independent of the loan term.
pub const HORIZON_YEARS: usize = 30;

const MONTHS_PER_YEAR: u32 = 12;

/// Input parameters for a single investment scenario.
///
/// One value per projection run; edits produce a fresh record rather than
/// mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentData {
    /// Purchase price of the property
    pub property_price: Money,
    /// Cash paid up front; the rest is loan-funded
    pub down_payment: Money,
    /// Loan term in years
    pub loan_term: u32,
    /// Annual nominal interest rate as a percentage (0.6 = 0.6%)
    pub interest_rate: Rate,
    /// Expected monthly rental income
    pub monthly_rent: Money,
    /// Monthly building management fee
    pub management_fee: Money,
    /// Monthly repair reserve contribution
    pub repair_reserve: Money,
    /// Effective tax rate as a percentage. Carried for display and advisory
    /// context; the cash-flow model does not consume it.
    pub tax_rate: Rate,
}

impl Default for InvestmentData {
    /// Seed scenario: a central-Tokyo one-room unit on a 35-year loan.
    fn default() -> Self {
        Self {
            property_price: dec!(85_000_000),
            down_payment: dec!(20_000_000),
            loan_term: 35,
            interest_rate: dec!(0.6),
            monthly_rent: dec!(320_000),
            management_fee: dec!(25_000),
            repair_reserve: dec!(15_000),
            tax_rate: dec!(1.0),
        }
    }
}

/// One projected year. Monetary fields are floored to whole yen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationYear {
    /// Year ordinal, 1-based
    pub year: u32,
    /// Net cash flow for the year (rent minus debt service minus fixed costs)
    pub cash_flow: Money,
    /// Floor of the running sum of raw annual cash flows through this year
    pub cumulative_cash_flow: Money,
    /// Outstanding loan principal at year end, never negative
    pub loan_remaining: Money,
    /// Property price minus outstanding principal (static-value assumption)
    pub equity: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project the full 30-year amortization schedule for a scenario.
///
/// Always returns exactly [`HORIZON_YEARS`] entries in ascending year order.
/// Amortization may finish before the horizon does; the remaining years carry
/// a zero balance. The monthly payment stays on the cash-flow line for all
/// 360 months even after payoff: principal and interest portions drop to
/// zero, but the payment amount itself never stops being charged.
pub fn project_schedule(input: &InvestmentData) -> MansionResult<Vec<SimulationYear>> {
    validate_input(input)?;

    let loan_amount = (input.property_price - input.down_payment).max(Decimal::ZERO);
    let monthly_rate = input.interest_rate / dec!(100) / dec!(12);
    let total_months = input.loan_term * MONTHS_PER_YEAR;

    let payment = monthly_payment(loan_amount, monthly_rate, total_months)?;

    let mut balance = loan_amount;
    let mut cumulative = Decimal::ZERO;
    let mut schedule = Vec::with_capacity(HORIZON_YEARS);

    for year in 1..=HORIZON_YEARS as u32 {
        let mut annual_cash_flow = Decimal::ZERO;

        for _ in 0..MONTHS_PER_YEAR {
            let interest = balance * monthly_rate;
            let principal = (payment - interest).max(Decimal::ZERO);
            balance = (balance - principal).max(Decimal::ZERO);

            annual_cash_flow +=
                input.monthly_rent - payment - input.management_fee - input.repair_reserve;
        }

        cumulative += annual_cash_flow;

        schedule.push(SimulationYear {
            year,
            cash_flow: annual_cash_flow.floor(),
            cumulative_cash_flow: cumulative.floor(),
            loan_remaining: balance.floor(),
            equity: (input.property_price - balance).floor(),
        });
    }

    Ok(schedule)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &InvestmentData) -> MansionResult<()> {
    if input.property_price <= Decimal::ZERO {
        return Err(MansionError::InvalidInput {
            field: "property_price".into(),
            reason: "Property price must be positive".into(),
        });
    }

    if input.down_payment < Decimal::ZERO {
        return Err(MansionError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot be negative".into(),
        });
    }

    if input.loan_term == 0 {
        return Err(MansionError::InvalidInput {
            field: "loan_term".into(),
            reason: "Loan term must be at least 1 year".into(),
        });
    }

    if input.interest_rate < Decimal::ZERO {
        return Err(MansionError::InvalidInput {
            field: "interest_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    if input.monthly_rent < Decimal::ZERO {
        return Err(MansionError::InvalidInput {
            field: "monthly_rent".into(),
            reason: "Monthly rent cannot be negative".into(),
        });
    }

    if input.management_fee < Decimal::ZERO || input.repair_reserve < Decimal::ZERO {
        return Err(MansionError::InvalidInput {
            field: "recurring_costs".into(),
            reason: "Management fee and repair reserve cannot be negative".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Amortization helpers
// ---------------------------------------------------------------------------

/// Constant monthly payment for the loan.
///
/// Standard annuity formula `P * r(1+r)^n / ((1+r)^n - 1)` when both the loan
/// and the rate are positive; straight-line `P / n` for an interest-free loan;
/// zero for a fully cash-funded purchase.
fn monthly_payment(
    loan_amount: Money,
    monthly_rate: Rate,
    total_months: u32,
) -> MansionResult<Money> {
    if loan_amount <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    if monthly_rate.is_zero() {
        if total_months == 0 {
            return Err(MansionError::DivisionByZero {
                context: "straight-line payment with zero months".into(),
            });
        }
        return Ok(loan_amount / Decimal::from(total_months));
    }

    let compounded = compound(monthly_rate, total_months);
    let denominator = compounded - Decimal::ONE;

    if denominator.is_zero() {
        return Err(MansionError::DivisionByZero {
            context: "annuity payment denominator".into(),
        });
    }

    Ok(loan_amount * monthly_rate * compounded / denominator)
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
fn compound(rate: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    /// Tokyo one-room scenario on a 35-year loan.
    fn sample_input() -> InvestmentData {
        InvestmentData::default()
    }

    // --- Schedule shape ---

    #[test]
    fn test_schedule_has_thirty_years_ascending() {
        let schedule = project_schedule(&sample_input()).unwrap();

        assert_eq!(schedule.len(), HORIZON_YEARS);
        for (i, entry) in schedule.iter().enumerate() {
            assert_eq!(entry.year, i as u32 + 1);
        }
    }

    #[test]
    fn test_loan_remaining_monotonically_decreases() {
        let schedule = project_schedule(&sample_input()).unwrap();

        for pair in schedule.windows(2) {
            assert!(
                pair[1].loan_remaining <= pair[0].loan_remaining,
                "balance rose from {} to {} between years {} and {}",
                pair[0].loan_remaining,
                pair[1].loan_remaining,
                pair[0].year,
                pair[1].year
            );
        }
    }

    #[test]
    fn test_loan_paid_off_by_term_end() {
        let mut input = sample_input();
        input.loan_term = 20;

        let schedule = project_schedule(&input).unwrap();
        assert_eq!(schedule[19].loan_remaining, Decimal::ZERO);
        for entry in &schedule[19..] {
            assert_eq!(entry.loan_remaining, Decimal::ZERO);
        }
    }

    #[test]
    fn test_equity_plus_balance_recovers_price() {
        let input = sample_input();
        let schedule = project_schedule(&input).unwrap();

        // Both sides are floored independently, so the identity holds to
        // within one yen.
        for entry in &schedule {
            let diff = input.property_price - (entry.equity + entry.loan_remaining);
            assert!(
                diff >= Decimal::ZERO && diff <= Decimal::ONE,
                "year {}: equity {} + balance {} vs price {}",
                entry.year,
                entry.equity,
                entry.loan_remaining,
                input.property_price
            );
        }
    }

    #[test]
    fn test_cumulative_is_floor_of_running_sum() {
        let schedule = project_schedule(&sample_input()).unwrap();

        // The cumulative column floors the raw running sum, so it may sit
        // above the sum of floored yearly figures by up to one yen per year.
        let mut sum_of_floors = Decimal::ZERO;
        for entry in &schedule {
            sum_of_floors += entry.cash_flow;
            let drift = entry.cumulative_cash_flow - sum_of_floors;
            assert!(
                drift >= Decimal::ZERO && drift <= Decimal::from(entry.year),
                "year {}: cumulative {} vs sum of floors {}",
                entry.year,
                entry.cumulative_cash_flow,
                sum_of_floors
            );
        }
    }

    #[test]
    fn test_determinism() {
        let input = sample_input();
        let first = project_schedule(&input).unwrap();
        let second = project_schedule(&input).unwrap();
        assert_eq!(first, second);
    }

    // --- Cash-funded purchase ---

    #[test]
    fn test_full_cash_purchase_has_no_debt_service() {
        let mut input = sample_input();
        input.down_payment = input.property_price;

        let schedule = project_schedule(&input).unwrap();
        let expected_cash_flow =
            (input.monthly_rent - input.management_fee - input.repair_reserve) * dec!(12);

        for entry in &schedule {
            assert_eq!(entry.loan_remaining, Decimal::ZERO);
            assert_eq!(entry.cash_flow, expected_cash_flow.floor());
            assert_eq!(entry.equity, input.property_price);
        }
    }

    #[test]
    fn test_down_payment_above_price_clamps_loan_to_zero() {
        let mut input = sample_input();
        input.down_payment = input.property_price + dec!(5_000_000);

        let schedule = project_schedule(&input).unwrap();
        assert_eq!(schedule[0].loan_remaining, Decimal::ZERO);
        assert_eq!(
            schedule[0].cash_flow,
            ((input.monthly_rent - input.management_fee - input.repair_reserve) * dec!(12)).floor()
        );
    }

    // --- Annuity math ---

    #[test]
    fn test_monthly_payment_sanity() {
        // ¥65M at 0.6% over 35 years lands a little over ¥171,000/month.
        let payment = monthly_payment(dec!(65_000_000), dec!(0.6) / dec!(100) / dec!(12), 420).unwrap();

        assert!(
            payment > dec!(171_000) && payment < dec!(172_300),
            "monthly payment {} outside expected range",
            payment
        );
    }

    #[test]
    fn test_first_year_balance_below_loan_amount() {
        let input = sample_input();
        let loan_amount = input.property_price - input.down_payment;

        let schedule = project_schedule(&input).unwrap();
        assert!(schedule[0].loan_remaining < loan_amount);
        assert!(schedule[0].loan_remaining > Decimal::ZERO);
    }

    #[test]
    fn test_first_year_cash_flow_consistent_with_annuity() {
        // Payment ~171.6k/month against 320k rent and 40k fixed costs leaves
        // roughly ¥1.3M of cash flow in year one.
        let schedule = project_schedule(&sample_input()).unwrap();

        assert!(
            schedule[0].cash_flow > dec!(1_280_000) && schedule[0].cash_flow < dec!(1_320_000),
            "year-1 cash flow {} outside expected range",
            schedule[0].cash_flow
        );
    }

    #[test]
    fn test_zero_rate_amortizes_straight_line() {
        let mut input = sample_input();
        input.property_price = dec!(70_000_000);
        input.down_payment = dec!(10_000_000);
        input.loan_term = 25;
        input.interest_rate = Decimal::ZERO;

        // ¥60M over 300 months is exactly ¥200,000/month.
        let schedule = project_schedule(&input).unwrap();
        let annual_principal = dec!(2_400_000);

        for entry in &schedule[..25] {
            let expected = dec!(60_000_000) - annual_principal * Decimal::from(entry.year);
            assert_eq!(entry.loan_remaining, expected.max(Decimal::ZERO));
        }
        assert_eq!(schedule[24].loan_remaining, Decimal::ZERO);
    }

    // --- Debt service after payoff ---

    #[test]
    fn test_payment_still_charged_after_payoff() {
        let mut input = sample_input();
        input.property_price = dec!(50_000_000);
        input.down_payment = dec!(20_000_000);
        input.loan_term = 10;
        input.interest_rate = dec!(1.0);
        input.monthly_rent = dec!(250_000);
        input.management_fee = dec!(20_000);
        input.repair_reserve = dec!(10_000);

        let schedule = project_schedule(&input).unwrap();

        // Paid off within the term...
        assert_eq!(schedule[9].loan_remaining, Decimal::ZERO);

        // ...yet the cash-flow line never improves: the payment amount is
        // charged every month of the horizon, so all 30 years match.
        let first = schedule[0].cash_flow;
        for entry in &schedule {
            assert_eq!(entry.cash_flow, first);
        }

        // And every year runs below the no-debt cash flow.
        let unlevered =
            (input.monthly_rent - input.management_fee - input.repair_reserve) * dec!(12);
        assert!(first < unlevered);
    }

    // --- Validation ---

    #[test]
    fn test_zero_price_rejected() {
        let mut input = sample_input();
        input.property_price = Decimal::ZERO;

        match project_schedule(&input).unwrap_err() {
            MansionError::InvalidInput { field, .. } => assert_eq!(field, "property_price"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_term_rejected() {
        let mut input = sample_input();
        input.loan_term = 0;

        match project_schedule(&input).unwrap_err() {
            MansionError::InvalidInput { field, .. } => assert_eq!(field, "loan_term"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut input = sample_input();
        input.interest_rate = dec!(-0.5);

        assert!(project_schedule(&input).is_err());
    }

    #[test]
    fn test_negative_rent_rejected() {
        let mut input = sample_input();
        input.monthly_rent = dec!(-1);

        assert!(project_schedule(&input).is_err());
    }
}
