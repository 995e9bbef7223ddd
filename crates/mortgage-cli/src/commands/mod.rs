pub mod chart;
pub mod schedule;

use clap::Args;
use rust_decimal::Decimal;

use mortgage_core::inputs::MortgageInputs;
use mortgage_core::PaymentCategory;

use crate::input;

/// Mortgage parameters shared by every schedule-based command.
#[derive(Args, Debug, Default)]
pub struct MortgageArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Assessed home value for property tax (defaults to price)
    #[arg(long)]
    pub home_value: Option<Decimal>,

    /// Down payment as a fraction of price (e.g. 0.20 for 20%)
    #[arg(long, alias = "down-pct")]
    pub down_payment_fraction: Option<Decimal>,

    /// Down payment as an absolute amount
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate (e.g. 0.065 for 6.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Loan term in years (default 30)
    #[arg(long, alias = "term")]
    pub term_years: Option<u32>,

    /// Monthly HOA dues
    #[arg(long)]
    pub hoa: Option<Decimal>,

    /// Monthly property tax
    #[arg(long)]
    pub property_tax: Option<Decimal>,

    /// Annual property tax as a fraction of home value
    #[arg(long)]
    pub property_tax_rate: Option<Decimal>,

    /// Monthly homeowner's insurance
    #[arg(long, alias = "hoi")]
    pub homeowners_insurance: Option<Decimal>,

    /// Monthly PMI premium
    #[arg(long, alias = "pmi")]
    pub pmi_monthly: Option<Decimal>,

    /// Equity fraction of price at which PMI stops (default 0.22)
    #[arg(long)]
    pub pmi_equity_threshold: Option<Decimal>,

    /// One-off closing costs
    #[arg(long)]
    pub closing_cost: Option<Decimal>,

    /// Gross annual income, for debt-to-income
    #[arg(long)]
    pub annual_income: Option<Decimal>,

    /// Other monthly debt payments, for debt-to-income
    #[arg(long)]
    pub monthly_debt: Option<Decimal>,
}

impl MortgageArgs {
    /// Inputs from the input file or stdin if present, otherwise from flags.
    pub fn into_inputs(self) -> Result<MortgageInputs, Box<dyn std::error::Error>> {
        if let Some(inputs) = input::load::<MortgageInputs>(self.input.as_deref())? {
            return Ok(inputs);
        }
        self.flags_to_inputs()
    }

    fn flags_to_inputs(self) -> Result<MortgageInputs, Box<dyn std::error::Error>> {
        if self.price.is_none() {
            return Err("--price is required (or provide --input)".into());
        }

        Ok(MortgageInputs {
            price: self.price,
            home_value: self.home_value,
            hoa: self.hoa,
            down_payment_fraction: self.down_payment_fraction,
            down_payment: self.down_payment,
            annual_rate: self.annual_rate,
            pmi_monthly: self.pmi_monthly,
            pmi_equity_threshold: self.pmi_equity_threshold,
            property_tax: self.property_tax,
            property_tax_rate: self.property_tax_rate,
            homeowners_insurance: self.homeowners_insurance,
            closing_cost: self.closing_cost,
            term_years: self.term_years,
            annual_income: self.annual_income,
            monthly_debt: self.monthly_debt,
            cumulative_categories: None,
        })
    }
}

/// Parse a category name such as `principal` or `property-tax`.
pub fn parse_category(s: &str) -> Result<PaymentCategory, String> {
    let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized)).map_err(|_| {
        format!(
            "unknown category '{}' (expected one of: principal, interest, hoa, \
             property_tax, homeowners_insurance, pmi)",
            s
        )
    })
}
