use serde::{Deserialize, Serialize};

use crate::models::{Direction, Trade};

/// Headline statistics for the dashboard, derived from one user's closed
/// trades. Every field is zero when there is no data yet; a new user sees
/// zeros, never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub break_even_trades: usize,
    pub total_profit: f64,
    /// Absolute value of the summed losses.
    pub total_loss: f64,
    pub net_profit_loss: f64,
    /// Whole percent.
    pub win_rate: f64,
    /// Two decimals; 0 when there are no losses to divide by.
    pub profit_factor: f64,
    pub avg_confluence: f64,
    /// Max over the full signed PnL set — can be <= 0 when nothing won.
    pub largest_win: f64,
    /// Absolute value of the most negative PnL.
    pub largest_loss: f64,
    pub best_streak: u32,
    pub worst_streak: u32,
    pub long_trades_win_rate: f64,
    pub short_trades_win_rate: f64,
}

/// Derive dashboard statistics from a snapshot of trade records. Only
/// CLOSED trades count; anything else in the slice is ignored.
pub fn compute_stats(trades: &[Trade]) -> DashboardStats {
    let closed: Vec<&Trade> = trades.iter().filter(|t| t.is_closed()).collect();
    if closed.is_empty() {
        return DashboardStats::default();
    }

    let total = closed.len();
    let total_profit: f64 = closed.iter().filter(|t| t.pnl() > 0.0).map(|t| t.pnl()).sum();
    let total_loss: f64 = closed
        .iter()
        .filter(|t| t.pnl() < 0.0)
        .map(|t| t.pnl())
        .sum::<f64>()
        .abs();
    let net_profit_loss: f64 = closed.iter().map(|t| t.pnl()).sum();

    let winning_trades = closed.iter().filter(|t| t.pnl() > 0.0).count();
    let losing_trades = closed.iter().filter(|t| t.pnl() < 0.0).count();
    let break_even_trades = closed.iter().filter(|t| t.pnl() == 0.0).count();

    let win_rate = (winning_trades as f64 / total as f64 * 100.0).round();
    let profit_factor = if total_loss > 0.0 {
        round2(total_profit / total_loss)
    } else {
        0.0
    };

    let avg_confluence =
        (closed.iter().map(|t| t.confluence_score).sum::<f64>() / total as f64).round();

    let largest_win = closed
        .iter()
        .map(|t| t.pnl())
        .fold(f64::NEG_INFINITY, f64::max);
    let largest_loss = closed
        .iter()
        .map(|t| t.pnl())
        .fold(f64::INFINITY, f64::min)
        .abs();

    let (best_streak, worst_streak) = streaks(&closed);

    let long_trades_win_rate = direction_win_rate(&closed, Direction::Long);
    let short_trades_win_rate = direction_win_rate(&closed, Direction::Short);

    DashboardStats {
        total_trades: total,
        winning_trades,
        losing_trades,
        break_even_trades,
        total_profit,
        total_loss,
        net_profit_loss,
        win_rate,
        profit_factor,
        avg_confluence,
        largest_win,
        largest_loss,
        best_streak,
        worst_streak,
        long_trades_win_rate,
        short_trades_win_rate,
    }
}

fn direction_win_rate(closed: &[&Trade], direction: Direction) -> f64 {
    let subset: Vec<&&Trade> = closed.iter().filter(|t| t.direction == direction).collect();
    if subset.is_empty() {
        return 0.0;
    }
    let wins = subset.iter().filter(|t| t.is_win()).count();
    (wins as f64 / subset.len() as f64 * 100.0).round()
}

/// Best winning and worst losing run, walked in chronological order.
///
/// A trade is a win iff its PnL is strictly positive; everything else —
/// including exact breakeven — extends or starts the losing branch. The
/// signed running counter is committed on every sign change and once more
/// after the loop for the in-progress run.
fn streaks(closed: &[&Trade]) -> (u32, u32) {
    if closed.is_empty() {
        return (0, 0);
    }

    let mut sorted: Vec<&&Trade> = closed.iter().collect();
    sorted.sort_by_key(|t| t.created_at);

    let mut current: i64 = 0;
    let mut best: i64 = 0;
    let mut worst: i64 = 0;
    let mut last_was_win = false;

    for (i, trade) in sorted.iter().enumerate() {
        let is_win = trade.is_win();
        if i == 0 {
            current = if is_win { 1 } else { -1 };
            last_was_win = is_win;
        } else if is_win == last_was_win {
            current += if is_win { 1 } else { -1 };
        } else {
            best = best.max(current);
            worst = worst.min(current);
            current = if is_win { 1 } else { -1 };
            last_was_win = is_win;
        }
    }
    best = best.max(current);
    worst = worst.min(current);

    (best.max(0) as u32, worst.min(0).unsigned_abs() as u32)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
