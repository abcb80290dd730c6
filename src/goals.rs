use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Trade, UserSettings};

/// Progress against the user's goals, composed from the month's closed
/// trades, today's trades, and the settings record. A goal field left at
/// zero means "not set" and produces neutral flags rather than an
/// always-tripped limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalsProgress {
    pub monthly_target: f64,
    pub monthly_progress: f64,
    /// Whole percent of the target already banked.
    pub monthly_progress_percent: f64,
    pub days_left_in_month: u32,
    /// Profit still needed per remaining day to hit the target.
    pub daily_target_remaining: f64,
    pub on_track_for_monthly: bool,

    pub max_daily_loss: f64,
    pub today_loss: f64,
    pub daily_loss_percent: f64,
    pub daily_loss_warning: bool,
    pub daily_loss_exceeded: bool,

    pub win_rate_goal: f64,
    pub current_win_rate: f64,
    pub win_rate_gap: f64,
    pub on_track_for_win_rate: bool,

    pub max_trades_per_day: u32,
    pub today_trades_count: usize,
    pub trades_remaining_today: u32,
    pub max_trades_reached: bool,

    pub avg_daily_profit: f64,
    pub projected_monthly_profit: f64,
}

/// Compose goal progress for `now`'s month and day. `month_trades` is the
/// month's closed trades; `today_trades` is everything saved today —
/// planned entries count toward the per-day trade cap.
pub fn goals_progress(
    settings: &UserSettings,
    month_trades: &[Trade],
    today_trades: &[Trade],
    now: DateTime<Utc>,
    warning_threshold_pct: f64,
) -> GoalsProgress {
    let monthly_profit: f64 = month_trades
        .iter()
        .filter(|t| t.is_closed())
        .map(|t| t.pnl())
        .sum();

    let monthly_target = settings.monthly_target;
    let monthly_progress_percent = if monthly_target > 0.0 {
        (monthly_profit / monthly_target * 100.0).round()
    } else {
        0.0
    };

    let days_in_month = days_in_month(now.year(), now.month());
    let current_day = now.day();
    let days_left_in_month = days_in_month.saturating_sub(current_day);

    let avg_daily_profit = monthly_profit / current_day as f64;
    let projected_monthly_profit = avg_daily_profit * days_in_month as f64;

    let target_remaining = (monthly_target - monthly_profit).max(0.0);
    let daily_target_remaining = if days_left_in_month > 0 {
        target_remaining / days_left_in_month as f64
    } else {
        target_remaining
    };
    let on_track_for_monthly = projected_monthly_profit >= monthly_target;

    let today_loss: f64 = today_trades
        .iter()
        .filter(|t| t.pnl() < 0.0)
        .map(|t| t.pnl())
        .sum::<f64>()
        .abs();

    let max_daily_loss = settings.max_daily_loss;
    let (daily_loss_percent, daily_loss_warning, daily_loss_exceeded) = if max_daily_loss > 0.0 {
        let pct = (today_loss / max_daily_loss * 100.0).round();
        (pct, pct >= warning_threshold_pct, today_loss >= max_daily_loss)
    } else {
        (0.0, false, false)
    };

    let closed_month: Vec<&Trade> = month_trades.iter().filter(|t| t.is_closed()).collect();
    let current_win_rate = if closed_month.is_empty() {
        0.0
    } else {
        let wins = closed_month.iter().filter(|t| t.is_win()).count();
        (wins as f64 / closed_month.len() as f64 * 100.0).round()
    };
    let win_rate_goal = settings.win_rate_goal;
    let win_rate_gap = (current_win_rate - win_rate_goal).round();
    let on_track_for_win_rate = current_win_rate >= win_rate_goal;

    let today_trades_count = today_trades.len();
    let max_trades_per_day = settings.max_trades_per_day;
    let (trades_remaining_today, max_trades_reached) = if max_trades_per_day > 0 {
        (
            max_trades_per_day.saturating_sub(today_trades_count as u32),
            today_trades_count as u32 >= max_trades_per_day,
        )
    } else {
        (0, false)
    };

    GoalsProgress {
        monthly_target,
        monthly_progress: monthly_profit,
        monthly_progress_percent,
        days_left_in_month,
        daily_target_remaining,
        on_track_for_monthly,
        max_daily_loss,
        today_loss,
        daily_loss_percent,
        daily_loss_warning,
        daily_loss_exceeded,
        win_rate_goal,
        current_win_rate,
        win_rate_gap,
        on_track_for_win_rate,
        max_trades_per_day,
        today_trades_count,
        trades_remaining_today,
        max_trades_reached,
        avg_daily_profit,
        projected_monthly_profit,
    }
}

/// Reason trading should be blocked right now, if any. Checked before the
/// save-trade screen opens.
pub fn should_block_trading(progress: &GoalsProgress) -> Option<String> {
    if progress.daily_loss_exceeded {
        return Some(format!(
            "Daily loss limit of ${} exceeded. Stop trading for today.",
            progress.max_daily_loss
        ));
    }
    if progress.max_trades_reached {
        return Some(format!(
            "Maximum {} trades per day reached. Take a break!",
            progress.max_trades_per_day
        ));
    }
    None
}

fn days_in_month(year: i32, month: u32) -> u32 {
    use chrono::NaiveDate;
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(a), Some(b)) => (b - a).num_days() as u32,
        _ => 30,
    }
}
