//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Validator acceptance — in-range prices pass, out-of-range prices are
//!    rejected with the offending field and index
//! 2. Normalizer bounds — every normalized value lies in [0, 1]
//! 3. Signal length — one signal per bar, whatever the batch
//! 4. Prediction windows — never larger than the batch

use barcast_core::domain::FeatureRow;
use barcast_core::features::Normalizer;
use barcast_core::validate::{validate, ValidationError, MAX_PRICE};
use barcast_core::Pipeline;
use proptest::prelude::*;
use serde_json::json;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..10_000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

/// (high, low, close) with low <= close <= high.
fn arb_hlc() -> impl Strategy<Value = (f64, f64, f64)> {
    (arb_price(), 0.0..50.0_f64, 0.0..1.0_f64).prop_map(|(low, spread, pos)| {
        let high = low + spread;
        (high, low, low + spread * pos)
    })
}

fn arb_batch(max_len: usize) -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
    prop::collection::vec(arb_hlc(), 1..max_len)
}

fn arb_feature_row() -> impl Strategy<Value = FeatureRow> {
    (arb_price(), -50.0..50.0_f64, 0.0..100.0_f64, 0.0..100.0_f64, 0.0..100.0_f64).prop_map(
        |(close, macd, plus_di, minus_di, adx)| FeatureRow {
            close,
            macd,
            plus_di,
            minus_di,
            adx,
        },
    )
}

fn to_json(batch: &[(f64, f64, f64)]) -> serde_json::Value {
    serde_json::Value::Array(
        batch
            .iter()
            .map(|&(high, low, close)| json!({"close": close, "high": high, "low": low}))
            .collect(),
    )
}

// ── 1. Validator acceptance ──────────────────────────────────────────

proptest! {
    #[test]
    fn valid_batches_are_accepted(batch in arb_batch(40)) {
        let bars = validate(&to_json(&batch)).unwrap();
        prop_assert_eq!(bars.len(), batch.len());
        for (bar, &(high, low, close)) in bars.iter().zip(&batch) {
            prop_assert_eq!(bar.high, high);
            prop_assert_eq!(bar.low, low);
            prop_assert_eq!(bar.close, close);
        }
    }

    #[test]
    fn out_of_range_price_names_field_and_index(
        batch in arb_batch(20),
        pick in any::<prop::sample::Index>(),
        field in 0usize..3,
        excess in 0.01..1e6_f64,
        negative in any::<bool>(),
    ) {
        let index = pick.index(batch.len());
        let name = ["close", "high", "low"][field];
        let bad = if negative { -excess } else { MAX_PRICE + excess };

        let mut data = to_json(&batch);
        data[index][name] = json!(bad);

        let err = validate(&data).unwrap_err();
        prop_assert_eq!(err, ValidationError::InvalidValue { field: name, index: Some(index) });
    }
}

// ── 2. Normalizer bounds ─────────────────────────────────────────────

proptest! {
    #[test]
    fn normalized_values_in_unit_range(
        rows in prop::collection::vec(arb_feature_row(), 1..60),
        window in 1usize..30,
    ) {
        let out = Normalizer::new(window).normalize(&rows).unwrap();
        prop_assert_eq!(out.len(), rows.len());
        for row in &out {
            for v in [row.macd, row.plus_di, row.minus_di, row.adx, row.close] {
                prop_assert!((0.0..=1.0).contains(&v), "normalized value {} out of range", v);
            }
        }
    }
}

// ── 3/4. Pipeline shape invariants ───────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn one_signal_per_bar_and_bounded_windows(batch in arb_batch(70)) {
        let bars = validate(&to_json(&batch)).unwrap();
        let analysis = Pipeline::default().analyze(&bars);

        prop_assert_eq!(analysis.signals.len(), bars.len());
        prop_assert_eq!(analysis.features.len(), bars.len());
        for window in analysis.predictions.windows() {
            prop_assert!(window <= bars.len());
            prop_assert_eq!(analysis.predictions.get(window).map(<[f64]>::len), Some(window));
        }
        for row in &analysis.features {
            prop_assert!(row.plus_di >= 0.0 && row.minus_di >= 0.0 && row.adx >= 0.0);
        }
    }
}
