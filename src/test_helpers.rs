use chrono::{DateTime, Duration, Utc};

use crate::checklist::ConfluenceSnapshot;
use crate::models::{Direction, NewTrade, Trade, TradeStatus, UserSettings};

pub fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .unwrap()
        .with_timezone(&Utc)
}

/// A closed trade with the given outcome, created at `created_at`.
pub fn closed_trade(pair: &str, direction: Direction, pnl: f64, created_at: &str) -> Trade {
    let created = ts(created_at);
    Trade {
        id: format!("{pair}-{created_at}"),
        user_id: "user-1".to_string(),
        currency_pair: pair.to_string(),
        direction,
        entry_price: Some(1.1000),
        stop_loss_price: Some(1.0950),
        take_profit_price: Some(1.1100),
        account_balance: Some(10_000.0),
        risk_percentage: Some(1.0),
        stop_loss_pips: Some(50.0),
        calculated_lot_size: Some("0.200 lots".to_string()),
        confluence_score: 0.0,
        confluence_data: ConfluenceSnapshot::empty_at(created),
        notes: None,
        chart_image_url: None,
        after_trade_image_url: Some("https://img.example/after.png".to_string()),
        status: TradeStatus::Closed,
        profit_loss: Some(pnl),
        exit_price: None,
        created_at: created,
        updated_at: created,
    }
}

/// Closed EUR/USD longs with the given outcomes, one minute apart so the
/// slice order is also chronological order.
pub fn closed_trades(pnls: &[f64]) -> Vec<Trade> {
    let base = ts("2025-03-03T09:00:00Z");
    pnls.iter()
        .enumerate()
        .map(|(i, &pnl)| {
            let created = base + Duration::minutes(i as i64);
            let mut trade = closed_trade("EUR/USD", Direction::Long, pnl, "2025-03-03T09:00:00Z");
            trade.id = format!("t{i}");
            trade.created_at = created;
            trade.updated_at = created;
            trade
        })
        .collect()
}

pub fn planned_trade(pair: &str, direction: Direction) -> Trade {
    let created = ts("2025-03-03T08:00:00Z");
    Trade {
        id: format!("planned-{pair}"),
        user_id: "user-1".to_string(),
        currency_pair: pair.to_string(),
        direction,
        entry_price: Some(1.1000),
        stop_loss_price: Some(1.0950),
        take_profit_price: None,
        account_balance: Some(10_000.0),
        risk_percentage: Some(1.0),
        stop_loss_pips: Some(50.0),
        calculated_lot_size: Some("0.200 lots".to_string()),
        confluence_score: 0.0,
        confluence_data: ConfluenceSnapshot::empty_at(created),
        notes: None,
        chart_image_url: None,
        after_trade_image_url: None,
        status: TradeStatus::Planned,
        profit_loss: None,
        exit_price: None,
        created_at: created,
        updated_at: created,
    }
}

pub fn new_trade_draft(user_id: &str, pair: &str, direction: Direction) -> NewTrade {
    NewTrade {
        user_id: user_id.to_string(),
        currency_pair: pair.to_string(),
        direction,
        entry_price: Some(1.1000),
        stop_loss_price: Some(1.0950),
        take_profit_price: None,
        account_balance: Some(10_000.0),
        risk_percentage: Some(1.0),
        stop_loss_pips: Some(50.0),
        calculated_lot_size: Some("0.200 lots".to_string()),
        confluence_score: 0.0,
        confluence_data: ConfluenceSnapshot::empty_at(ts("2025-03-03T08:00:00Z")),
        notes: None,
        chart_image_url: None,
        status: TradeStatus::Planned,
    }
}

pub fn test_settings(
    monthly_target: f64,
    max_daily_loss: f64,
    win_rate_goal: f64,
    max_trades_per_day: u32,
) -> UserSettings {
    let created = ts("2025-01-01T00:00:00Z");
    UserSettings {
        id: "settings-1".to_string(),
        user_id: "user-1".to_string(),
        monthly_target,
        max_daily_loss,
        win_rate_goal,
        max_trades_per_day,
        daily_reminder_enabled: false,
        daily_reminder_time: "08:00".to_string(),
        inactivity_reminder_enabled: false,
        inactivity_days: 3,
        created_at: created,
        updated_at: created,
    }
}
