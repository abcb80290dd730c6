use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Crate-level knobs. Per-user goals live in `UserSettings`; these are the
/// app-wide defaults an embedder rarely touches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    /// Weight assigned to a user-added checklist item.
    pub custom_item_weight: f64,
    /// How many months the monthly P&L series looks back by default.
    pub monthly_pnl_months: usize,
    /// Percent of the daily loss limit at which the goals card starts warning.
    pub daily_loss_warning_pct: f64,
    pub log_level: String,
}

impl JournalConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        JournalConfig {
            custom_item_weight: env("CUSTOM_ITEM_WEIGHT", "5").parse().unwrap_or(5.0),
            monthly_pnl_months: env("MONTHLY_PNL_MONTHS", "6").parse().unwrap_or(6),
            daily_loss_warning_pct: env("DAILY_LOSS_WARNING_PCT", "80").parse().unwrap_or(80.0),
            log_level: env("LOG_LEVEL", "INFO").to_string(),
        }
    }

    pub fn shared(self) -> Arc<JournalConfig> {
        Arc::new(self)
    }
}

impl Default for JournalConfig {
    fn default() -> Self {
        JournalConfig {
            custom_item_weight: 5.0,
            monthly_pnl_months: 6,
            daily_loss_warning_pct: 80.0,
            log_level: "INFO".to_string(),
        }
    }
}
