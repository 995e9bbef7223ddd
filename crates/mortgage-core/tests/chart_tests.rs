use mortgage_core::aggregation::cumulative::cumulative_sum_by_fields;
use mortgage_core::analysis::analyze_mortgage;
use mortgage_core::chart::nearest::{nearest_at_pixel, nearest_period, MonthScale};
use mortgage_core::chart::stack::{
    cumulative_category_at, stack_layers, stacked_category_at, y_extent, ExtentMode,
};
use mortgage_core::inputs::MortgageInputs;
use mortgage_core::PaymentCategory;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn sample_inputs() -> MortgageInputs {
    MortgageInputs {
        price: Some(dec!(300_000)),
        down_payment: Some(dec!(15_000)),
        annual_rate: Some(dec!(0.06)),
        pmi_monthly: Some(dec!(150)),
        pmi_equity_threshold: Some(dec!(0.20)),
        hoa: Some(dec!(75)),
        property_tax: Some(dec!(275)),
        homeowners_insurance: Some(dec!(110)),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Nearest period
// ---------------------------------------------------------------------------

#[test]
fn test_nearest_period_reference_queries() {
    let schedule = analyze_mortgage(&sample_inputs()).unwrap().result.schedule;
    assert_eq!(schedule.len(), 360);

    let cases = [(1.4, 1), (1.6, 2), (0.0, 1), (361.0, 360)];
    for (query, expected) in cases {
        let found = nearest_period(&schedule, query).unwrap();
        assert_eq!(found.month, expected, "query {query}");
    }
}

#[test]
fn test_nearest_returns_the_record_itself() {
    let schedule = analyze_mortgage(&sample_inputs()).unwrap().result.schedule;
    let found = nearest_period(&schedule, 24.2).unwrap();
    assert_eq!(*found, schedule[23]);
}

#[test]
fn test_nearest_on_cumulative_series() {
    let analysis = analyze_mortgage(&sample_inputs()).unwrap().result;
    let found = nearest_period(&analysis.cumulative, 12.0).unwrap();
    let expected: Decimal = analysis.schedule[..12].iter().map(|r| r.principal).sum();
    assert_eq!(found.month, 12);
    assert_eq!(found.principal, expected);
}

#[test]
fn test_pointer_to_period_through_scale() {
    let schedule = analyze_mortgage(&sample_inputs()).unwrap().result.schedule;
    let scale = MonthScale::for_series(&schedule, 700.0).unwrap();
    assert_eq!(nearest_at_pixel(&schedule, &scale, 0.0).unwrap().month, 1);
    assert_eq!(nearest_at_pixel(&schedule, &scale, 700.0).unwrap().month, 360);
    assert_eq!(nearest_at_pixel(&schedule, &scale, 350.0).unwrap().month, 180);
}

// ---------------------------------------------------------------------------
// Stacked layers
// ---------------------------------------------------------------------------

#[test]
fn test_stack_top_equals_monthly_total() {
    let schedule = analyze_mortgage(&sample_inputs()).unwrap().result.schedule;
    let layers = stack_layers(&schedule, &PaymentCategory::ALL);
    let top = layers.last().unwrap();
    for (point, record) in top.points.iter().zip(&schedule) {
        assert_eq!(point.month, record.month);
        assert_eq!(point.upper, record.total());
    }
}

#[test]
fn test_pmi_layer_collapses_after_cutoff() {
    let analysis = analyze_mortgage(&sample_inputs()).unwrap().result;
    let layers = stack_layers(&analysis.schedule, &PaymentCategory::ALL);
    let pmi_layer = layers
        .iter()
        .find(|l| l.category == PaymentCategory::Pmi)
        .unwrap();

    let cutoff = analysis.summary.pmi_periods as usize;
    assert!(cutoff > 0 && cutoff < 360);
    assert_eq!(
        pmi_layer.points[cutoff - 1].upper - pmi_layer.points[cutoff - 1].lower,
        dec!(150)
    );
    assert_eq!(pmi_layer.points[cutoff].upper, pmi_layer.points[cutoff].lower);
}

#[test]
fn test_tooltip_category_in_first_month() {
    let schedule = analyze_mortgage(&sample_inputs()).unwrap().result.schedule;
    let first = &schedule[0];
    let keys = PaymentCategory::ALL;

    // Principal band is at the bottom, interest directly above.
    assert_eq!(stacked_category_at(first, &keys, first.principal / dec!(2)), 0);
    assert_eq!(stacked_category_at(first, &keys, first.principal + dec!(1)), 1);
    assert_eq!(stacked_category_at(first, &keys, first.total() + dec!(1)), 5);
}

#[test]
fn test_cumulative_tooltip_and_extent() {
    let analysis = analyze_mortgage(&sample_inputs()).unwrap().result;
    let keys = PaymentCategory::LOAN_COSTS;
    let cumulative = cumulative_sum_by_fields(&analysis.schedule, &keys);
    let last = cumulative.last().unwrap();

    // Interest dominates a 6% 30-year loan by the end.
    assert!(last.interest > last.principal);
    assert_eq!(cumulative_category_at(last, &keys, last.interest), 1);

    let extent = y_extent(&cumulative, &keys, ExtentMode::Max);
    assert_eq!(extent, last.interest * dec!(1.25));
}
