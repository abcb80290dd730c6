use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user goal configuration, read by the goals-progress computation.
/// Mutated by settings screens outside this crate; a zeroed field means
/// "no goal set" rather than a hard limit of zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub id: String,
    pub user_id: String,
    pub monthly_target: f64,
    pub max_daily_loss: f64,
    /// 0-100.
    pub win_rate_goal: f64,
    pub max_trades_per_day: u32,
    pub daily_reminder_enabled: bool,
    /// "HH:MM", consumed by the reminder scheduler outside this crate.
    pub daily_reminder_time: String,
    pub inactivity_reminder_enabled: bool,
    pub inactivity_days: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
