use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mansion_core::simulation::{self, InvestmentData};

use crate::input;

/// Scenario parameters, each falling back to the seed scenario when omitted.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScenarioArgs {
    /// Purchase price in yen
    #[arg(long)]
    pub property_price: Option<Decimal>,

    /// Up-front cash in yen
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub loan_term: Option<u32>,

    /// Annual interest rate as a percentage (0.6 = 0.6%)
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Expected monthly rent in yen
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Monthly management fee in yen
    #[arg(long)]
    pub management_fee: Option<Decimal>,

    /// Monthly repair reserve in yen
    #[arg(long)]
    pub repair_reserve: Option<Decimal>,

    /// Effective tax rate as a percentage
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl ScenarioArgs {
    /// Resolve the scenario: input file wins, then piped stdin, then the
    /// seed scenario with any flags applied on top.
    pub fn resolve(&self) -> Result<InvestmentData, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::read_json(path);
        }
        if let Some(data) = input::read_stdin()? {
            return Ok(serde_json::from_value(data)?);
        }

        let mut data = InvestmentData::default();
        if let Some(v) = self.property_price {
            data.property_price = v;
        }
        if let Some(v) = self.down_payment {
            data.down_payment = v;
        }
        if let Some(v) = self.loan_term {
            data.loan_term = v;
        }
        if let Some(v) = self.interest_rate {
            data.interest_rate = v;
        }
        if let Some(v) = self.monthly_rent {
            data.monthly_rent = v;
        }
        if let Some(v) = self.management_fee {
            data.management_fee = v;
        }
        if let Some(v) = self.repair_reserve {
            data.repair_reserve = v;
        }
        if let Some(v) = self.tax_rate {
            data.tax_rate = v;
        }
        Ok(data)
    }
}

pub fn run_simulate(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let data = args.resolve()?;
    let result = simulation::run_simulation(&data)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_kpis(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let data = args.resolve()?;
    let schedule = simulation::project_schedule(&data)?;
    let kpis = simulation::summarise_kpis(&data, &schedule)?;
    Ok(serde_json::to_value(kpis)?)
}
