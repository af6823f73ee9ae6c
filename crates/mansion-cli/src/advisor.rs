use mansion_core::advisory::AdviceContext;
use rust_decimal::Decimal;
use serde_json::json;

/// Shown whenever the advisory call fails, whatever the reason.
pub const FALLBACK_ADVICE: &str =
    "申し訳ありません。AIアドバイザーとの通信中にエラーが発生しました。時間を置いて再度お試しください。";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Client for the external advisory service (OpenAI-compatible chat API).
///
/// One request per question, no retry, no explicit timeout. The simulation
/// engine never depends on this path.
pub struct AdvisorClient {
    http: reqwest::blocking::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl AdvisorClient {
    pub fn from_env() -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            model: std::env::var("MANSION_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
        }
    }

    /// Ask the advisor. Never fails: a missing credential, transport error,
    /// or empty completion collapses into the fixed fallback message.
    pub fn investment_advice(&self, question: &str, context: &AdviceContext) -> String {
        match self.request_advice(question, context) {
            Ok(text) if !text.trim().is_empty() => text,
            _ => FALLBACK_ADVICE.to_string(),
        }
    }

    fn request_advice(
        &self,
        question: &str,
        context: &AdviceContext,
    ) -> Result<String, Box<dyn std::error::Error>> {
        let api_key = self.api_key.as_deref().ok_or("OPENAI_API_KEY is not set")?;

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_instruction(context) },
                { "role": "user", "content": question },
            ],
            "temperature": 0.7,
        });

        let response: serde_json::Value = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string())
    }
}

/// System prompt for the advisory model. Built from the context projection
/// only; the rest of the scenario stays inside the engine.
pub fn system_instruction(context: &AdviceContext) -> String {
    format!(
        "あなたは世界最高峰の不動産投資戦略コンサルタントです。\n\
         「MansionInvest AI」の利用者に対し、客観的、論理的、かつ資産形成を成功に導くための鋭いアドバイスを提供してください。\n\n\
         【現在のシミュレーション状況】\n\
         - 物件価格: ¥{}\n\
         - 自己資金: ¥{}\n\
         - ローン金利: {}%\n\
         - ローン期間: {}年\n\
         - 想定家賃: ¥{}/月\n\n\
         【回答の指針】\n\
         1. 現実的な診断: 収支が厳しい場合は、はっきりとリスクを指摘してください。\n\
         2. 具体的アクション: 「頭金を増やす」「管理費を抑える」「エリアを見直す」など、具体的な改善策を提示してください。\n\
         3. 市場動向の反映: 最新の金利上昇リスクや、人口動態に基づいた賃貸需要の視点を含めてください。\n\
         4. プロフェッショナルな品格: 高級感のあるサービスにふさわしい、丁寧かつ信頼感のある言葉遣い（日本語）を徹底してください。\n\n\
         回答はMarkdown形式を使用し、重要な数値や結論は太字で強調してください。",
        group_thousands(&context.property_price),
        group_thousands(&context.down_payment),
        context.interest_rate,
        context.loan_term,
        group_thousands(&context.monthly_rent),
    )
}

/// Thousands grouping for whole-yen display (85000000 -> 85,000,000).
fn group_thousands(amount: &Decimal) -> String {
    let whole = amount.trunc().to_string();
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", whole.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}", sign, grouped)
}
