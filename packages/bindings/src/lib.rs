use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use mortgage_core::aggregation::cumulative;
use mortgage_core::amortization::{payment, schedule};
use mortgage_core::amortization::schedule::PaymentRecord;
use mortgage_core::chart::{nearest, stack};
use mortgage_core::inputs::MortgageInputs;
use mortgage_core::{Money, PaymentCategory, Rate};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<T: for<'de> Deserialize<'de>>(input_json: &str) -> NapiResult<T> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn render<T: serde::Serialize>(value: &T) -> NapiResult<String> {
    serde_json::to_string(value).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct PaymentRequest {
    principal: Money,
    periodic_rate: Rate,
    periods: u32,
}

#[derive(Deserialize)]
struct ScheduleRequest {
    inputs: MortgageInputs,
    #[serde(default)]
    monthly_payment: Option<Money>,
}

#[derive(Deserialize)]
struct CumulativeRequest {
    schedule: Vec<PaymentRecord>,
    #[serde(default)]
    fields: Option<Vec<PaymentCategory>>,
}

#[derive(Deserialize)]
struct NearestRequest {
    series: Vec<PaymentRecord>,
    month: f64,
}

#[derive(Deserialize)]
struct StackRequest {
    series: Vec<PaymentRecord>,
    #[serde(default)]
    keys: Option<Vec<PaymentCategory>>,
}

// ---------------------------------------------------------------------------
// Full recompute
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_mortgage(input_json: String) -> NapiResult<String> {
    let input: MortgageInputs = parse(&input_json)?;
    let output = mortgage_core::analysis::analyze_mortgage(&input).map_err(to_napi_error)?;
    render(&output)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let req: PaymentRequest = parse(&input_json)?;
    let pmt = payment::monthly_payment(req.principal, req.periodic_rate, req.periods)
        .map_err(to_napi_error)?;
    render(&serde_json::json!({ "monthly_payment": pmt }))
}

/// Schedule for resolved inputs; the level payment is derived unless given.
#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let req: ScheduleRequest = parse(&input_json)?;
    let snapshot = req.inputs.resolve();
    snapshot.validate().map_err(to_napi_error)?;
    let pmt: Decimal = match req.monthly_payment {
        Some(p) => p,
        None => payment::level_payment(&snapshot).map_err(to_napi_error)?,
    };
    render(&schedule::build_schedule(&snapshot, pmt))
}

// ---------------------------------------------------------------------------
// Aggregation and chart helpers
// ---------------------------------------------------------------------------

#[napi]
pub fn cumulative_sum_by_fields(input_json: String) -> NapiResult<String> {
    let req: CumulativeRequest = parse(&input_json)?;
    let fields = req
        .fields
        .unwrap_or_else(|| PaymentCategory::LOAN_COSTS.to_vec());
    render(&cumulative::cumulative_sum_by_fields(&req.schedule, &fields))
}

/// Returns `null` for an empty series.
#[napi]
pub fn nearest_period(input_json: String) -> NapiResult<String> {
    let req: NearestRequest = parse(&input_json)?;
    render(&nearest::nearest_period(&req.series, req.month))
}

#[napi]
pub fn stack_layers(input_json: String) -> NapiResult<String> {
    let req: StackRequest = parse(&input_json)?;
    let keys = req.keys.unwrap_or_else(|| PaymentCategory::ALL.to_vec());
    render(&stack::stack_layers(&req.series, &keys))
}
