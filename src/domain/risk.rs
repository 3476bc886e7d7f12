//! Position sizing and the daily-loss circuit breaker.

/// Integer share quantity bounded by the per-trade risk budget.
///
/// budget = equity * per_trade_risk_pct, stop distance = price *
/// stop_loss_pct, quantity = floor(budget / stop distance). A non-positive
/// stop distance (zero price or zero stop percentage) sizes to zero rather
/// than dividing by zero.
pub fn position_size(
    equity: f64,
    price: f64,
    per_trade_risk_pct: f64,
    stop_loss_pct: f64,
) -> i64 {
    let risk_budget = equity * per_trade_risk_pct;
    let stop_distance = price * stop_loss_pct;
    if stop_distance <= 0.0 {
        return 0;
    }
    let qty = (risk_budget / stop_distance).floor() as i64;
    qty.max(0)
}

/// True when the session drawdown from `starting_equity` reaches
/// `max_daily_loss_pct`. Never trips on a non-positive starting equity.
pub fn exceeded_daily_loss(
    starting_equity: f64,
    current_equity: f64,
    max_daily_loss_pct: f64,
) -> bool {
    if starting_equity <= 0.0 {
        return false;
    }
    let drawdown = (starting_equity - current_equity) / starting_equity;
    drawdown >= max_daily_loss_pct
}
