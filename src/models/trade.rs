use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checklist::ConfluenceSnapshot;
use crate::models::{Direction, TradeStatus};

/// A journal entry as persisted by the backing store. Price and sizing
/// fields are nullable because a planned trade may be saved before every
/// number is known; `profit_loss` is only meaningful once `status` is
/// CLOSED.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub user_id: String,
    pub currency_pair: String,
    pub direction: Direction,
    pub entry_price: Option<f64>,
    pub stop_loss_price: Option<f64>,
    pub take_profit_price: Option<f64>,
    pub account_balance: Option<f64>,
    pub risk_percentage: Option<f64>,
    pub stop_loss_pips: Option<f64>,
    /// Formatted at save time from balance/risk/pips, e.g. "0.25 lots".
    pub calculated_lot_size: Option<String>,
    pub confluence_score: f64,
    pub confluence_data: ConfluenceSnapshot,
    pub notes: Option<String>,
    pub chart_image_url: Option<String>,
    pub after_trade_image_url: Option<String>,
    pub status: TradeStatus,
    pub profit_loss: Option<f64>,
    pub exit_price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trade {
    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed
    }

    /// Signed outcome, 0.0 while the trade is still planned.
    pub fn pnl(&self) -> f64 {
        self.profit_loss.unwrap_or(0.0)
    }

    /// The single win predicate used by every count, rate, and streak:
    /// strictly positive PnL. Breakeven is not a win.
    pub fn is_win(&self) -> bool {
        self.pnl() > 0.0
    }
}

/// User-entered fields handed to `TradeJournal::plan_trade`. The journal
/// derives the rest (lot size, confluence snapshot, status, timestamps).
#[derive(Debug, Clone)]
pub struct TradeDraft {
    pub user_id: String,
    pub currency_pair: String,
    pub direction: Direction,
    pub entry_price: Option<f64>,
    pub stop_loss_price: Option<f64>,
    pub take_profit_price: Option<f64>,
    pub account_balance: Option<f64>,
    pub risk_percentage: Option<f64>,
    pub stop_loss_pips: Option<f64>,
    pub notes: Option<String>,
    pub chart_image_url: Option<String>,
}

/// Close payload. The outcome and the after-trade screenshot are both
/// mandatory at close time.
#[derive(Debug, Clone)]
pub struct TradeOutcome {
    pub profit_loss: f64,
    pub after_trade_image_url: String,
    pub exit_price: Option<f64>,
}

/// Insert payload: everything the store does not assign itself (id,
/// created_at, updated_at).
#[derive(Debug, Clone)]
pub struct NewTrade {
    pub user_id: String,
    pub currency_pair: String,
    pub direction: Direction,
    pub entry_price: Option<f64>,
    pub stop_loss_price: Option<f64>,
    pub take_profit_price: Option<f64>,
    pub account_balance: Option<f64>,
    pub risk_percentage: Option<f64>,
    pub stop_loss_pips: Option<f64>,
    pub calculated_lot_size: Option<String>,
    pub confluence_score: f64,
    pub confluence_data: ConfluenceSnapshot,
    pub notes: Option<String>,
    pub chart_image_url: Option<String>,
    pub status: TradeStatus,
}

/// Partial update applied by the store; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TradePatch {
    pub notes: Option<String>,
    pub chart_image_url: Option<String>,
    pub after_trade_image_url: Option<String>,
    pub status: Option<TradeStatus>,
    pub profit_loss: Option<f64>,
    pub exit_price: Option<f64>,
}
