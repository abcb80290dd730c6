mod common;

use common::{draft, init_tracing, journal, outcome, settings, ts};

use trade_journal::checklist::{overall_score, Checklist, ChecklistState, ConfluenceSnapshot, SetupGrade};
use trade_journal::config::JournalConfig;
use trade_journal::error::JournalError;
use trade_journal::models::{Direction, TradeStatus};
use trade_journal::stats::DashboardStats;

#[tokio::test]
async fn new_user_sees_zeroed_dashboard() {
    init_tracing();
    let (journal, _store) = journal();

    let stats = journal.dashboard("user-1").await.unwrap();
    assert_eq!(stats, DashboardStats::default());

    assert!(journal
        .trading_days("user-1", None, None)
        .await
        .unwrap()
        .is_empty());
    let pairs = journal.performing_pairs("user-1").await.unwrap();
    assert!(pairs.best.is_none() && pairs.worst.is_none());
    assert!(journal.monthly_pnl("user-1", None).await.unwrap().is_empty());

    // No settings record yet: no goals, nothing blocks trading.
    assert!(journal.goals("user-1", ts("2025-03-10T12:00:00Z")).await.unwrap().is_none());
    assert!(journal
        .trading_block("user-1", ts("2025-03-10T12:00:00Z"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn checklist_to_closed_trade_lifecycle() {
    init_tracing();
    let (journal, store) = journal();
    store.set_sim_time(Some(ts("2025-03-05T09:00:00Z"))).await;

    // Work through the checklist with the confirmation gate accepting,
    // plus one user-defined criterion at the configured default weight.
    let mut checklist = Checklist::standard();
    let custom_id = checklist
        .add_custom("Spread acceptable", JournalConfig::default().custom_item_weight)
        .unwrap()
        .id
        .clone();
    let mut state = ChecklistState::new();
    for id in ["w1", "w2", "w5", "d1", "d2", "4h5", "4h7", "e1", custom_id.as_str()] {
        let item = checklist.find(id).unwrap();
        assert!(state.toggle_confirmed(item, |_| true));
    }
    let score = overall_score(&checklist, state.checked_ids());
    assert_eq!(score, 85.0);
    assert_eq!(SetupGrade::for_score(score), SetupGrade::Good);

    let snapshot = ConfluenceSnapshot::capture_at(&checklist, &state, ts("2025-03-05T09:00:00Z"));
    assert_eq!(snapshot.score, score);
    assert_eq!(snapshot.grade(), SetupGrade::Good);

    // Plan: lot size is derived at save time.
    let trade = journal
        .plan_trade(draft("user-1", "EUR/USD", Direction::Long), snapshot)
        .await
        .unwrap();
    assert_eq!(trade.status, TradeStatus::Planned);
    assert_eq!(trade.confluence_score, 85.0);
    assert_eq!(trade.calculated_lot_size.as_deref(), Some("0.200 lots"));
    assert!(trade.profit_loss.is_none());

    // Pre-close edits are allowed.
    journal.update_notes(&trade.id, "London open setup").await.unwrap();

    // Close exactly once.
    let closed = journal.close_trade(&trade.id, outcome(150.0)).await.unwrap();
    assert_eq!(closed.status, TradeStatus::Closed);
    assert_eq!(closed.profit_loss, Some(150.0));
    assert!(closed.after_trade_image_url.is_some());
    assert_eq!(closed.notes.as_deref(), Some("London open setup"));

    // Closed means immutable: no second close, no edits.
    let again = journal.close_trade(&trade.id, outcome(99.0)).await;
    assert!(matches!(again, Err(JournalError::TradeClosed(_))));
    let edit = journal.update_notes(&trade.id, "rewriting history").await;
    assert!(matches!(edit, Err(JournalError::TradeClosed(_))));

    // Deletion is the one remaining operation.
    journal.delete_trade(&trade.id).await.unwrap();
    let gone = journal.trade(&trade.id).await;
    assert!(matches!(gone, Err(JournalError::NotFound(_))));
}

#[tokio::test]
async fn plan_trade_validation() {
    init_tracing();
    let (journal, store) = journal();
    store.set_sim_time(Some(ts("2025-03-05T09:00:00Z"))).await;
    let snapshot = ConfluenceSnapshot::empty_at(ts("2025-03-05T09:00:00Z"));

    let bad_pair = draft("user-1", "eurusd", Direction::Long);
    let err = journal.plan_trade(bad_pair, snapshot.clone()).await;
    assert!(matches!(err, Err(JournalError::Validation(_))));

    let mut no_pips = draft("user-1", "EUR/USD", Direction::Long);
    no_pips.stop_loss_pips = None;
    let err = journal.plan_trade(no_pips, snapshot.clone()).await;
    assert!(matches!(err, Err(JournalError::Validation(_))));

    // Closing demands the after-trade screenshot.
    let trade = journal
        .plan_trade(draft("user-1", "EUR/USD", Direction::Long), snapshot)
        .await
        .unwrap();
    let mut no_image = outcome(10.0);
    no_image.after_trade_image_url = "  ".to_string();
    let err = journal.close_trade(&trade.id, no_image).await;
    assert!(matches!(err, Err(JournalError::Validation(_))));
}

async fn seed_closed(
    journal: &trade_journal::journal::TradeJournal,
    store: &trade_journal::store::MemoryStore,
    user: &str,
    pair: &str,
    pnl: f64,
    created_at: &str,
) {
    store.set_sim_time(Some(ts(created_at))).await;
    let trade = journal
        .plan_trade(
            draft(user, pair, Direction::Long),
            ConfluenceSnapshot::empty_at(ts(created_at)),
        )
        .await
        .unwrap();
    journal.close_trade(&trade.id, outcome(pnl)).await.unwrap();
}

#[tokio::test]
async fn dashboard_stats_through_the_service() {
    init_tracing();
    let (journal, store) = journal();

    // W W L W W W L L, one per day in March 2025.
    let outcomes = [10.0, 10.0, -5.0, 10.0, 10.0, 10.0, -5.0, -5.0];
    for (i, pnl) in outcomes.iter().enumerate() {
        let created = format!("2025-03-{:02}T10:00:00Z", i + 3);
        seed_closed(&journal, &store, "user-1", "EUR/USD", *pnl, &created).await;
    }

    let stats = journal.dashboard("user-1").await.unwrap();
    assert_eq!(stats.total_trades, 8);
    assert_eq!(stats.winning_trades, 5);
    assert_eq!(stats.losing_trades, 3);
    assert_eq!(stats.win_rate, 63.0); // round(62.5)
    assert_eq!(stats.net_profit_loss, 35.0);
    assert_eq!(stats.total_profit, 50.0);
    assert_eq!(stats.total_loss, 15.0);
    assert_eq!(stats.profit_factor, 3.33);
    assert_eq!(stats.best_streak, 3);
    assert_eq!(stats.worst_streak, 2);
    assert_eq!(stats.largest_win, 10.0);
    assert_eq!(stats.largest_loss, 5.0);
    assert_eq!(stats.long_trades_win_rate, 63.0);
    assert_eq!(stats.short_trades_win_rate, 0.0);

    // Another user's journal stays untouched.
    let other = journal.dashboard("user-2").await.unwrap();
    assert_eq!(other, DashboardStats::default());
}

#[tokio::test]
async fn pair_report_through_the_service() {
    init_tracing();
    let (journal, store) = journal();

    seed_closed(&journal, &store, "user-1", "EUR/USD", 100.0, "2025-03-03T10:00:00Z").await;
    seed_closed(&journal, &store, "user-1", "EUR/USD", -30.0, "2025-03-04T10:00:00Z").await;
    seed_closed(&journal, &store, "user-1", "GBP/USD", 500.0, "2025-03-05T10:00:00Z").await;

    let report = journal.performing_pairs("user-1").await.unwrap();
    let best = report.best.unwrap();
    let worst = report.worst.unwrap();
    assert_eq!(best.pair, "GBP/USD");
    assert_eq!(best.profit, 500.0);
    assert_eq!(worst.pair, "EUR/USD");
    assert_eq!(worst.profit, 70.0);
}

#[tokio::test]
async fn calendar_rollups_through_the_service() {
    init_tracing();
    let (journal, store) = journal();

    seed_closed(&journal, &store, "user-1", "EUR/USD", 40.0, "2025-02-10T10:00:00Z").await;
    seed_closed(&journal, &store, "user-1", "EUR/USD", 200.0, "2025-03-05T09:00:00Z").await;
    seed_closed(&journal, &store, "user-1", "EUR/USD", -50.0, "2025-03-05T15:00:00Z").await;
    seed_closed(&journal, &store, "user-1", "EUR/USD", 10.0, "2025-03-06T11:00:00Z").await;

    let days = journal
        .trading_days("user-1", Some(2025), Some(3))
        .await
        .unwrap();
    assert_eq!(days.len(), 2);
    let d5 = &days[&ts("2025-03-05T00:00:00Z").date_naive()];
    assert_eq!(d5.profit, 150.0);
    assert_eq!(d5.win_rate, 50.0);
    let d6 = &days[&ts("2025-03-06T00:00:00Z").date_naive()];
    assert_eq!(d6.profit, 10.0);
    assert_eq!(d6.win_rate, 100.0);

    // ceil(31 / 7) = 5 week rows, trailing ones zeroed.
    let weeks = journal.weekly_summary("user-1", 2025, 3).await.unwrap();
    assert_eq!(weeks.len(), 5);
    assert_eq!(weeks[0].profit, 160.0);
    assert_eq!(weeks[0].days, 2);
    assert_eq!(weeks[0].trades, 3);
    assert_eq!(weeks[4].trades, 0);

    let months = journal.monthly_pnl("user-1", None).await.unwrap();
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].month, "Feb 2025");
    assert_eq!(months[0].profit, 40.0);
    assert_eq!(months[1].month, "Mar 2025");
    assert_eq!(months[1].profit, 160.0);
    assert_eq!(months[1].trades, 3);
}

#[tokio::test]
async fn goals_progress_and_trading_block() {
    init_tracing();
    let (journal, store) = journal();
    store.put_settings(settings("user-1")).await;

    seed_closed(&journal, &store, "user-1", "EUR/USD", -120.0, "2025-03-10T09:00:00Z").await;
    seed_closed(&journal, &store, "user-1", "EUR/USD", 80.0, "2025-03-08T09:00:00Z").await;

    let now = ts("2025-03-10T18:00:00Z");
    let progress = journal.goals("user-1", now).await.unwrap().unwrap();
    assert_eq!(progress.monthly_progress, -40.0);
    assert_eq!(progress.today_loss, 120.0);
    assert_eq!(progress.daily_loss_percent, 60.0);
    assert!(!progress.daily_loss_warning);
    assert_eq!(progress.today_trades_count, 1);
    assert_eq!(progress.trades_remaining_today, 4);
    assert!(journal.trading_block("user-1", now).await.unwrap().is_none());

    // A second loss today trips the $200 daily limit.
    seed_closed(&journal, &store, "user-1", "GBP/USD", -110.0, "2025-03-10T14:00:00Z").await;
    let progress = journal.goals("user-1", now).await.unwrap().unwrap();
    assert_eq!(progress.today_loss, 230.0);
    assert!(progress.daily_loss_exceeded);
    let reason = journal.trading_block("user-1", now).await.unwrap().unwrap();
    assert!(reason.contains("Daily loss limit"), "{reason}");
}
