//! DMI / ADX — Directional Movement Index and Average Directional Index.
//!
//! Steps (simple rolling averages, not Wilder smoothing):
//! 1. +DM / -DM from consecutive highs and lows (both 0 on the first bar)
//! 2. ATR = rolling mean of True Range over `period`
//! 3. +DI = 100 * rolling_sum(+DM) / ATR, -DI likewise
//! 4. DX = 100 * |+DI - -DI| / (+DI + -DI)
//! 5. ADX = rolling mean of DX over `period`
//!
//! A zero ATR or a zero DI sum leaves the value undefined; nothing here ever
//! produces NaN or infinity.
//! Lookback: period - 1 for the DI lines, 2 * (period - 1) for ADX.

use crate::components::indicator::Indicator;
use crate::domain::Bar;
use crate::indicators::atr::Atr;
use crate::indicators::rolling::{rolling_mean, rolling_sum};

/// All DMI lines for one batch. Every vector has the batch's length.
#[derive(Debug, Clone, PartialEq)]
pub struct DmiSeries {
    pub plus_di: Vec<Option<f64>>,
    pub minus_di: Vec<Option<f64>>,
    pub dx: Vec<Option<f64>>,
    pub adx: Vec<Option<f64>>,
}

/// +DM and -DM per bar.
///
/// `upMove = high[t] - high[t-1]`, `downMove = low[t-1] - low[t]`; a move
/// only counts when it is positive and larger than the opposite move.
pub fn directional_movement(bars: &[Bar]) -> (Vec<f64>, Vec<f64>) {
    let mut plus_dm = vec![0.0; bars.len()];
    let mut minus_dm = vec![0.0; bars.len()];

    for i in 1..bars.len() {
        let up_move = bars[i].high - bars[i - 1].high;
        let down_move = bars[i - 1].low - bars[i].low;

        if up_move > down_move && up_move > 0.0 {
            plus_dm[i] = up_move;
        }
        if down_move > up_move && down_move > 0.0 {
            minus_dm[i] = down_move;
        }
    }

    (plus_dm, minus_dm)
}

/// `100 * numerator / denominator`, undefined on a zero denominator.
fn percent_of(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let (num, den) = (numerator?, denominator?);
    if den == 0.0 {
        return None;
    }
    let value = 100.0 * (num / den);
    value.is_finite().then_some(value)
}

/// Compute +DI, -DI, DX and ADX in one pass over the bars.
pub fn dmi_series(bars: &[Bar], period: usize) -> DmiSeries {
    let (plus_dm, minus_dm) = directional_movement(bars);
    let atr = Atr::new(period.max(1)).compute(bars);

    let plus_sum = rolling_sum(&plus_dm.into_iter().map(Some).collect::<Vec<_>>(), period);
    let minus_sum = rolling_sum(&minus_dm.into_iter().map(Some).collect::<Vec<_>>(), period);

    let plus_di: Vec<Option<f64>> = plus_sum
        .iter()
        .zip(&atr)
        .map(|(&sum, &atr)| percent_of(sum, atr))
        .collect();
    let minus_di: Vec<Option<f64>> = minus_sum
        .iter()
        .zip(&atr)
        .map(|(&sum, &atr)| percent_of(sum, atr))
        .collect();

    let dx: Vec<Option<f64>> = plus_di
        .iter()
        .zip(&minus_di)
        .map(|(&p, &m)| {
            let (p, m) = (p?, m?);
            percent_of(Some((p - m).abs()), Some(p + m))
        })
        .collect();

    let adx = rolling_mean(&dx, period);

    DmiSeries {
        plus_di,
        minus_di,
        dx,
        adx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_hlc_bars, DEFAULT_EPSILON};

    fn trending_bars(n: usize) -> Vec<Bar> {
        let data: Vec<(f64, f64, f64)> = (0..n)
            .map(|i| {
                let base = 100.0 + i as f64 * 5.0;
                (base + 3.0, base - 3.0, base + 2.0)
            })
            .collect();
        make_hlc_bars(&data)
    }

    #[test]
    fn directional_movement_rules() {
        let bars = make_hlc_bars(&[
            (10.0, 8.0, 9.0),
            (12.0, 9.0, 11.0), // up 2, down -1 -> +DM 2
            (11.0, 6.0, 7.0),  // up -1, down 3 -> -DM 3
            (13.0, 4.0, 8.0),  // up 2, down 2 -> tie, neither
        ]);
        let (plus, minus) = directional_movement(&bars);
        assert_eq!(plus, vec![0.0, 2.0, 0.0, 0.0]);
        assert_eq!(minus, vec![0.0, 0.0, 3.0, 0.0]);
    }

    #[test]
    fn flat_high_low_gives_zero_di_and_undefined_dx() {
        let bars = make_hlc_bars(&[(105.0, 95.0, 100.0); 20]);
        let series = dmi_series(&bars, 14);

        for i in 0..13 {
            assert_eq!(series.plus_di[i], None);
            assert_eq!(series.dx[i], None);
        }
        for i in 13..20 {
            assert_eq!(series.plus_di[i], Some(0.0));
            assert_eq!(series.minus_di[i], Some(0.0));
            // 0 / 0: explicitly undefined, not NaN
            assert_eq!(series.dx[i], None);
        }
        assert!(series.adx.iter().all(Option::is_none));
    }

    #[test]
    fn zero_true_range_leaves_di_undefined() {
        let bars = make_hlc_bars(&[(50.0, 50.0, 50.0); 6]);
        let series = dmi_series(&bars, 3);
        assert!(series.plus_di.iter().all(Option::is_none));
        assert!(series.minus_di.iter().all(Option::is_none));
    }

    #[test]
    fn strong_uptrend_has_plus_di_dominant_and_high_adx() {
        let bars = trending_bars(30);
        let series = dmi_series(&bars, 5);

        // +DM = 5 every bar after the first, TR = 6 (high - low) after the first
        // +DI at bar 5 = 100 * 25 / 6
        assert_approx(series.plus_di[5].unwrap(), 100.0 * 25.0 / 6.0, DEFAULT_EPSILON);
        assert_eq!(series.minus_di[5], Some(0.0));
        assert_approx(series.dx[5].unwrap(), 100.0, DEFAULT_EPSILON);

        let last_adx = series.adx.last().copied().flatten().unwrap();
        assert_approx(last_adx, 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn adx_bounds() {
        let bars = make_hlc_bars(&[
            (105.0, 95.0, 102.0),
            (108.0, 100.0, 106.0),
            (107.0, 98.0, 99.0),
            (103.0, 97.0, 101.0),
            (106.0, 100.0, 105.0),
            (110.0, 103.0, 108.0),
            (112.0, 106.0, 110.0),
            (111.0, 104.0, 105.0),
            (109.0, 103.0, 107.0),
            (113.0, 105.0, 112.0),
        ]);
        let series = dmi_series(&bars, 3);
        for (i, v) in series.adx.iter().enumerate() {
            if let Some(v) = v {
                assert!((0.0..=100.0).contains(v), "ADX out of bounds at bar {i}: {v}");
            }
        }
        assert!(series.adx[4].is_some());
    }

    #[test]
    fn truncated_batch_is_prefix_of_full() {
        let bars = trending_bars(30);
        let full = dmi_series(&bars, 5);
        let head = dmi_series(&bars[..12], 5);
        assert_eq!(&full.adx[..12], head.adx.as_slice());
        assert_eq!(&full.plus_di[..12], head.plus_di.as_slice());
    }
}
