use clap::Args;
use serde_json::{json, Value};

use mansion_core::advisory::AdviceContext;

use super::simulate::ScenarioArgs;
use crate::advisor::AdvisorClient;

/// Arguments for the advisory chat
#[derive(Args)]
pub struct AdviseArgs {
    /// Question for the advisor
    pub question: String,

    #[command(flatten)]
    pub scenario: ScenarioArgs,
}

pub fn run_advise(args: AdviseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let data = args.scenario.resolve()?;
    let context = AdviceContext::from(&data);

    let client = AdvisorClient::from_env();
    let advice = client.investment_advice(&args.question, &context);

    Ok(json!({
        "question": args.question,
        "advice": advice,
        "context": serde_json::to_value(&context)?,
    }))
}
