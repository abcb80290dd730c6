use std::sync::Arc;

use chrono::{DateTime, Utc};

use trade_journal::config::JournalConfig;
use trade_journal::journal::TradeJournal;
use trade_journal::models::{Direction, TradeDraft, TradeOutcome, UserSettings};
use trade_journal::store::MemoryStore;

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .ok();
}

pub fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .unwrap()
        .with_timezone(&Utc)
}

/// A journal wired to a fresh in-memory store; the store handle is kept so
/// tests can pin its clock and seed settings.
pub fn journal() -> (TradeJournal, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let journal = TradeJournal::new(
        JournalConfig::default(),
        store.clone(),
        store.clone(),
    );
    (journal, store)
}

pub fn draft(user_id: &str, pair: &str, direction: Direction) -> TradeDraft {
    TradeDraft {
        user_id: user_id.to_string(),
        currency_pair: pair.to_string(),
        direction,
        entry_price: Some(1.1000),
        stop_loss_price: Some(1.0950),
        take_profit_price: Some(1.1100),
        account_balance: Some(10_000.0),
        risk_percentage: Some(1.0),
        stop_loss_pips: Some(50.0),
        notes: None,
        chart_image_url: Some("https://img.example/chart.png".to_string()),
    }
}

pub fn outcome(pnl: f64) -> TradeOutcome {
    TradeOutcome {
        profit_loss: pnl,
        after_trade_image_url: "https://img.example/after.png".to_string(),
        exit_price: None,
    }
}

pub fn settings(user_id: &str) -> UserSettings {
    let created = ts("2025-01-01T00:00:00Z");
    UserSettings {
        id: format!("settings-{user_id}"),
        user_id: user_id.to_string(),
        monthly_target: 1000.0,
        max_daily_loss: 200.0,
        win_rate_goal: 60.0,
        max_trades_per_day: 5,
        daily_reminder_enabled: true,
        daily_reminder_time: "08:00".to_string(),
        inactivity_reminder_enabled: true,
        inactivity_days: 3,
        created_at: created,
        updated_at: created,
    }
}
