use market_core::{AnomalyEvent, MarketError, PricePoint};

/// Default day-over-day move threshold, in percent
pub const DEFAULT_THRESHOLD: f64 = 5.0;

/// Day-over-day percentage change between two closes
pub fn percentage_change(current: f64, previous: f64) -> f64 {
    (current - previous) / previous * 100.0
}

/// Scan an ascending daily close series and flag every adjacent-pair move
/// whose absolute percentage change is at least `threshold` (boundary
/// inclusive). The comparison uses the unrounded change; the emitted event
/// carries it rounded to two decimals. Series of length 0 or 1 produce an
/// empty result. A zero previous close has no defined percentage change and
/// is rejected instead of letting a non-finite value flow downstream.
pub fn detect_spikes_and_dips(
    prices: &[PricePoint],
    threshold: f64,
) -> Result<Vec<AnomalyEvent>, MarketError> {
    let mut events = Vec::new();

    for pair in prices.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);

        if previous.close == 0.0 {
            return Err(MarketError::InvalidInput(format!(
                "zero close on {} makes the percentage change undefined",
                previous.date
            )));
        }

        let change = percentage_change(current.close, previous.close);
        if change.abs() >= threshold {
            events.push(AnomalyEvent {
                date: current.date,
                change_pct: (change * 100.0).round() / 100.0,
                previous_close: previous.close,
                current_close: current.close,
            });
        }
    }

    Ok(events)
}
