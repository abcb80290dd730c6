pub mod calendar;
pub mod dashboard;
pub mod pairs;

pub use calendar::{bucket_by_day, monthly_pnl, weekly_summary, MonthlyPnL, TradingDay, WeeklySummary};
pub use dashboard::{compute_stats, DashboardStats};
pub use pairs::{best_worst_pairs, PairPerformance, PairReport};
