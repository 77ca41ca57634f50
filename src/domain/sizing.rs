//! Volatility-targeted position sizing.

/// Substituted for an exactly-zero daily volatility so the size stays finite.
pub const VOL_FLOOR: f64 = 0.001;

/// Position size per bar: `risk_per_trade / volatility[i - 1]`, clipped to
/// 1.0 (no leverage). Sizing looks at the previous bar's volatility only, so
/// the decision uses nothing the bar itself reveals. Undefined volatility
/// gives an undefined size.
pub fn position_sizes(volatility: &[Option<f64>], risk_per_trade: f64) -> Vec<Option<f64>> {
    let mut sizes = vec![None; volatility.len()];
    for i in 1..volatility.len() {
        sizes[i] = volatility[i - 1].map(|vol| {
            let vol = if vol == 0.0 { VOL_FLOOR } else { vol };
            (risk_per_trade / vol).min(1.0)
        });
    }
    sizes
}
