#[cfg(test)]
mod tests {
    use super::super::detector::*;
    use chrono::NaiveDate;
    use market_core::{MarketError, PricePoint};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    // Helper to build a series with one close per consecutive day
    fn series(closes: &[f64]) -> Vec<PricePoint> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: day(i as u32 + 1),
                close,
            })
            .collect()
    }

    #[test]
    fn test_six_percent_spike_flagged() {
        let prices = series(&[100.0, 100.0, 106.0]);

        let events = detect_spikes_and_dips(&prices, DEFAULT_THRESHOLD).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, day(3));
        assert!((events[0].change_pct - 6.00).abs() < 1e-9);
        assert!((events[0].previous_close - 100.0).abs() < 1e-9);
        assert!((events[0].current_close - 106.0).abs() < 1e-9);
    }

    #[test]
    fn test_four_percent_dip_below_threshold() {
        let prices = series(&[50.0, 48.0]);

        let events = detect_spikes_and_dips(&prices, DEFAULT_THRESHOLD).unwrap();

        assert!(events.is_empty());
    }

    #[test]
    fn test_exact_threshold_is_included() {
        // 100 -> 105 is exactly +5.00%
        let prices = series(&[100.0, 105.0]);

        let events = detect_spikes_and_dips(&prices, 5.0).unwrap();

        assert_eq!(events.len(), 1);
        assert!((events[0].change_pct - 5.00).abs() < 1e-9);
    }

    #[test]
    fn test_dip_flagged_by_absolute_value() {
        // 100 -> 94 is -6.00%
        let prices = series(&[100.0, 94.0]);

        let events = detect_spikes_and_dips(&prices, 5.0).unwrap();

        assert_eq!(events.len(), 1);
        assert!((events[0].change_pct + 6.00).abs() < 1e-9);
    }

    #[test]
    fn test_empty_series_yields_nothing() {
        let events = detect_spikes_and_dips(&[], DEFAULT_THRESHOLD).unwrap();

        assert!(events.is_empty());
    }

    #[test]
    fn test_single_point_yields_nothing() {
        let prices = series(&[100.0]);

        let events = detect_spikes_and_dips(&prices, DEFAULT_THRESHOLD).unwrap();

        assert!(events.is_empty());
    }

    #[test]
    fn test_zero_previous_close_is_rejected() {
        let prices = series(&[0.0, 10.0]);

        let result = detect_spikes_and_dips(&prices, DEFAULT_THRESHOLD);

        assert!(matches!(result, Err(MarketError::InvalidInput(_))));
    }

    #[test]
    fn test_change_rounded_to_two_decimals() {
        // 3.0 -> 3.1 is +3.3333...%
        let prices = series(&[3.0, 3.1]);

        let events = detect_spikes_and_dips(&prices, 1.0).unwrap();

        assert_eq!(events.len(), 1);
        assert!((events[0].change_pct - 3.33).abs() < 1e-9);
    }

    #[test]
    fn test_comparison_uses_unrounded_change() {
        // 100 -> 104.996 is +4.996%, which rounds to 5.00 but must not qualify
        let prices = series(&[100.0, 104.996]);

        let events = detect_spikes_and_dips(&prices, 5.0).unwrap();

        assert!(events.is_empty());
    }

    #[test]
    fn test_all_qualifying_transitions_flagged_in_order() {
        // +10%, -9.09%, +1%, +19.8% against threshold 5
        let prices = series(&[100.0, 110.0, 100.0, 101.0, 121.0]);

        let events = detect_spikes_and_dips(&prices, 5.0).unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].date, day(2));
        assert_eq!(events[1].date, day(3));
        assert_eq!(events[2].date, day(5));
        assert!(events.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_detect_is_idempotent() {
        let prices = series(&[100.0, 110.0, 100.0, 106.0]);

        let first = detect_spikes_and_dips(&prices, 5.0).unwrap();
        let second = detect_spikes_and_dips(&prices, 5.0).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_percentage_change_sign() {
        assert!((percentage_change(106.0, 100.0) - 6.0).abs() < 1e-9);
        assert!((percentage_change(94.0, 100.0) + 6.0).abs() < 1e-9);
    }
}
