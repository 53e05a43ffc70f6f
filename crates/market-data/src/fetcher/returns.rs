//! Trailing return calculation over daily closes.

use rust_decimal::Decimal;

use crate::models::ReturnWindow;

/// Samples needed for a 1-month return (about one trading month).
pub const ONE_MONTH_SAMPLES: usize = 21;

/// Samples needed for a 3-month return (about one trading quarter).
pub const THREE_MONTH_SAMPLES: usize = 63;

/// Trailing returns derived from a close series.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrailingReturns {
    pub one_month_pct: Option<Decimal>,
    pub three_month_pct: Option<Decimal>,
    /// Return since the earliest sample, set only when there are too few
    /// samples for a 3-month figure
    pub short_window: Option<ReturnWindow>,
}

/// Compute trailing returns from closes ordered oldest to newest.
///
/// - 1-month: needs 21 samples, measured from the 21st close from the end.
/// - 3-month: needs 63 samples, measured from the first close.
/// - With 2 to 62 samples the return from the first close is reported as a
///   labelled short window instead of a 3-month figure.
pub fn trailing_returns(closes: &[Decimal]) -> TrailingReturns {
    let mut returns = TrailingReturns::default();
    if closes.len() < 2 {
        return returns;
    }

    let last = closes[closes.len() - 1];

    if closes.len() >= ONE_MONTH_SAMPLES {
        returns.one_month_pct = pct_change(closes[closes.len() - ONE_MONTH_SAMPLES], last);
    }

    if closes.len() >= THREE_MONTH_SAMPLES {
        returns.three_month_pct = pct_change(closes[0], last);
    } else {
        returns.short_window = pct_change(closes[0], last).map(|pct| ReturnWindow {
            days: closes.len() - 1,
            pct,
        });
    }

    returns
}

fn pct_change(base: Decimal, current: Decimal) -> Option<Decimal> {
    if base.is_zero() {
        return None;
    }
    Some((current - base) / base * Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn series(len: usize, start: Decimal, step: Decimal) -> Vec<Decimal> {
        (0..len)
            .map(|i| start + step * Decimal::from(i as u64))
            .collect()
    }

    #[test]
    fn test_too_little_history() {
        assert_eq!(trailing_returns(&[]), TrailingReturns::default());
        assert_eq!(trailing_returns(&[dec!(10)]), TrailingReturns::default());
    }

    #[test]
    fn test_short_history_reports_labelled_window() {
        let closes = vec![dec!(100), dec!(105), dec!(110)];
        let returns = trailing_returns(&closes);
        assert_eq!(returns.one_month_pct, None);
        assert_eq!(returns.three_month_pct, None);
        assert_eq!(
            returns.short_window,
            Some(ReturnWindow {
                days: 2,
                pct: dec!(10)
            })
        );
    }

    #[test]
    fn test_one_month_uses_twenty_first_from_end() {
        // 21 samples: 100, 101, ..., 120
        let closes = series(21, dec!(100), dec!(1));
        let returns = trailing_returns(&closes);
        assert_eq!(returns.one_month_pct, Some(dec!(20)));
        assert_eq!(returns.three_month_pct, None);
        assert!(returns.short_window.is_some());
    }

    #[test]
    fn test_three_month_with_full_quarter() {
        // 63 samples: 50, 50.5, ..., 81
        let closes = series(63, dec!(50), dec!(0.5));
        let returns = trailing_returns(&closes);
        assert_eq!(returns.three_month_pct, Some(dec!(62)));
        // 1-month base is closes[42] = 71
        let expected_1mo = (dec!(81) - dec!(71)) / dec!(71) * dec!(100);
        assert_eq!(returns.one_month_pct, Some(expected_1mo));
        assert_eq!(returns.short_window, None);
    }

    #[test]
    fn test_zero_base_is_skipped() {
        let closes = vec![Decimal::ZERO, dec!(5)];
        assert_eq!(trailing_returns(&closes).short_window, None);
    }
}
