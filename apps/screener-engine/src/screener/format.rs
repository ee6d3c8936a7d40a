//! Text table formatting for ranked spreads.

use super::scoring::ScoredSpread;

/// Format a ranked spread list as a fixed-width text table.
///
/// Estimated deltas are marked with `*` so chain-provided and
/// Black-Scholes-estimated values are distinguishable at a glance.
#[must_use]
pub fn format_output_table(spreads: &[ScoredSpread]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<6} {:<4} {:<12} {:>4} {:>8} {:>8} {:>7} {:>6} {:>8} {:>5} {:>6} {:>9} {:>7} {:>6} {:>6} {:>6}\n",
        "symbol", "type", "expiration", "dte", "short_k", "long_k", "credit", "roc",
        "delta", "est", "pop", "break_even", "be_dist", "liq", "slip", "score",
    ));

    for s in spreads {
        let spread = &s.spread;
        out.push_str(&format!(
            "{:<6} {:<4} {:<12} {:>4} {:>8.2} {:>8.2} {:>7.2} {:>6.3} {:>8.4} {:>5} {:>6.3} {:>9.2} {:>6.2}% {:>6.3} {:>6.3} {:>6.3}\n",
            spread.symbol,
            spread.spread_type.to_string(),
            spread.expiration.to_string(),
            spread.dte,
            spread.short_strike,
            spread.long_strike,
            spread.credit,
            spread.roc,
            spread.short_delta,
            if spread.delta_estimated { "*" } else { "" },
            spread.prob_profit,
            spread.break_even,
            spread.break_even_distance_pct * 100.0,
            s.liquidity_score,
            s.slippage_score,
            s.total_score,
        ));
    }

    out
}
