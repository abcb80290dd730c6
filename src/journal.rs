use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use tracing::{debug, info};

use crate::checklist::ConfluenceSnapshot;
use crate::config::JournalConfig;
use crate::error::JournalError;
use crate::goals::{goals_progress, should_block_trading, GoalsProgress};
use crate::models::{NewTrade, Trade, TradeDraft, TradeOutcome, TradePatch, TradeStatus};
use crate::risk;
use crate::stats;
use crate::stats::{DashboardStats, MonthlyPnL, PairReport, TradingDay, WeeklySummary};
use crate::store::{SettingsStore, TradeFilter, TradeStore};

type Result<T> = std::result::Result<T, JournalError>;

/// The journal service: owns no state of its own, just the injected
/// collaborators. Write operations enforce the trade lifecycle; read
/// operations fetch a snapshot from the store and hand it to the pure
/// aggregators.
pub struct TradeJournal {
    config: JournalConfig,
    store: Arc<dyn TradeStore>,
    settings: Arc<dyn SettingsStore>,
}

impl TradeJournal {
    pub fn new(
        config: JournalConfig,
        store: Arc<dyn TradeStore>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            config,
            store,
            settings,
        }
    }

    /// Save a planned trade. Lot size is computed here, once, from the
    /// draft's balance/risk/stop distance; the confluence snapshot is
    /// attached as-is with its score.
    pub async fn plan_trade(
        &self,
        draft: TradeDraft,
        snapshot: ConfluenceSnapshot,
    ) -> Result<Trade> {
        validate_pair(&draft.currency_pair)?;
        let pips = draft
            .stop_loss_pips
            .ok_or_else(|| JournalError::Validation("stop loss in pips is required".to_string()))?;
        if pips <= 0.0 {
            return Err(JournalError::Validation(format!(
                "stop loss must be a positive pip distance, got {pips}"
            )));
        }
        if let Some(r) = draft.risk_percentage {
            if r <= 0.0 {
                return Err(JournalError::Validation(format!(
                    "risk percentage must be positive, got {r}"
                )));
            }
        }

        let calculated_lot_size = match (draft.account_balance, draft.risk_percentage) {
            (Some(balance), Some(risk_pct)) => {
                risk::lot_size(balance, risk_pct, pips).map(|l| l.to_string())
            }
            _ => None,
        };

        let new = NewTrade {
            user_id: draft.user_id,
            currency_pair: draft.currency_pair,
            direction: draft.direction,
            entry_price: draft.entry_price,
            stop_loss_price: draft.stop_loss_price,
            take_profit_price: draft.take_profit_price,
            account_balance: draft.account_balance,
            risk_percentage: draft.risk_percentage,
            stop_loss_pips: Some(pips),
            calculated_lot_size,
            confluence_score: snapshot.score,
            confluence_data: snapshot,
            notes: draft.notes,
            chart_image_url: draft.chart_image_url,
            status: TradeStatus::Planned,
        };

        let trade = self.store.insert(new).await?;
        info!(
            id = %trade.id,
            pair = %trade.currency_pair,
            direction = %trade.direction,
            score = trade.confluence_score,
            "trade planned"
        );
        Ok(trade)
    }

    /// Record the outcome: the one PLANNED -> CLOSED transition. A closed
    /// trade is immutable, so a second close is rejected.
    pub async fn close_trade(&self, id: &str, outcome: TradeOutcome) -> Result<Trade> {
        let existing = self.trade(id).await?;
        if existing.is_closed() {
            return Err(JournalError::TradeClosed(id.to_string()));
        }
        if outcome.after_trade_image_url.trim().is_empty() {
            return Err(JournalError::Validation(
                "after-trade screenshot is required to close a trade".to_string(),
            ));
        }

        let patch = TradePatch {
            status: Some(TradeStatus::Closed),
            profit_loss: Some(outcome.profit_loss),
            after_trade_image_url: Some(outcome.after_trade_image_url),
            exit_price: outcome.exit_price,
            ..Default::default()
        };
        let closed = self.store.update(id, patch).await?;
        info!(id = %closed.id, pnl = outcome.profit_loss, "trade closed");
        Ok(closed)
    }

    /// Pre-close edit. Rejected once the trade is closed.
    pub async fn update_notes(&self, id: &str, notes: &str) -> Result<Trade> {
        self.patch_open(
            id,
            TradePatch {
                notes: Some(notes.to_string()),
                ..Default::default()
            },
        )
        .await
    }

    /// Pre-close edit. Rejected once the trade is closed.
    pub async fn attach_chart(&self, id: &str, url: &str) -> Result<Trade> {
        self.patch_open(
            id,
            TradePatch {
                chart_image_url: Some(url.to_string()),
                ..Default::default()
            },
        )
        .await
    }

    /// Permanent removal; works on any status. The one thing still allowed
    /// on a closed trade.
    pub async fn delete_trade(&self, id: &str) -> Result<()> {
        let trade = self.trade(id).await?;
        self.store.delete(id).await?;
        info!(id = %trade.id, pair = %trade.currency_pair, "trade deleted");
        Ok(())
    }

    pub async fn trade(&self, id: &str) -> Result<Trade> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| JournalError::NotFound(id.to_string()))
    }

    pub async fn trades(&self, user_id: &str) -> Result<Vec<Trade>> {
        Ok(self.store.query(&TradeFilter::for_user(user_id)).await?)
    }

    pub async fn dashboard(&self, user_id: &str) -> Result<DashboardStats> {
        let closed = self.closed_trades(user_id).await?;
        debug!(user = user_id, trades = closed.len(), "computing dashboard");
        Ok(stats::compute_stats(&closed))
    }

    pub async fn trading_days(
        &self,
        user_id: &str,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<BTreeMap<NaiveDate, TradingDay>> {
        let closed = self.closed_trades(user_id).await?;
        Ok(stats::bucket_by_day(&closed, year, month))
    }

    pub async fn performing_pairs(&self, user_id: &str) -> Result<PairReport> {
        let closed = self.closed_trades(user_id).await?;
        Ok(stats::best_worst_pairs(&closed))
    }

    /// Monthly P&L series; `months_back` defaults to the configured window.
    pub async fn monthly_pnl(
        &self,
        user_id: &str,
        months_back: Option<usize>,
    ) -> Result<Vec<MonthlyPnL>> {
        let closed = self.closed_trades(user_id).await?;
        let window = months_back.unwrap_or(self.config.monthly_pnl_months);
        Ok(stats::monthly_pnl(&closed, window))
    }

    pub async fn weekly_summary(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<WeeklySummary>> {
        let closed = self.closed_trades(user_id).await?;
        let days = stats::bucket_by_day(&closed, Some(year), Some(month));
        Ok(stats::weekly_summary(&days, year, month))
    }

    /// Goal progress for `now`'s month and day; `None` when the user has no
    /// settings record yet.
    pub async fn goals(&self, user_id: &str, now: DateTime<Utc>) -> Result<Option<GoalsProgress>> {
        let Some(settings) = self.settings.settings_for(user_id).await? else {
            return Ok(None);
        };

        let (month_start, month_end) = month_bounds(now);
        let month_trades = self
            .store
            .query(&TradeFilter::closed_for(user_id).between(month_start, month_end))
            .await?;

        let (day_start, day_end) = day_bounds(now);
        let today_trades = self
            .store
            .query(&TradeFilter::for_user(user_id).between(day_start, day_end))
            .await?;

        Ok(Some(goals_progress(
            &settings,
            &month_trades,
            &today_trades,
            now,
            self.config.daily_loss_warning_pct,
        )))
    }

    /// Convenience composition used by the save-trade flow.
    pub async fn trading_block(&self, user_id: &str, now: DateTime<Utc>) -> Result<Option<String>> {
        Ok(self
            .goals(user_id, now)
            .await?
            .as_ref()
            .and_then(should_block_trading))
    }

    async fn patch_open(&self, id: &str, patch: TradePatch) -> Result<Trade> {
        let existing = self.trade(id).await?;
        if existing.is_closed() {
            return Err(JournalError::TradeClosed(id.to_string()));
        }
        Ok(self.store.update(id, patch).await?)
    }

    async fn closed_trades(&self, user_id: &str) -> Result<Vec<Trade>> {
        Ok(self.store.query(&TradeFilter::closed_for(user_id)).await?)
    }
}

fn validate_pair(pair: &str) -> Result<()> {
    let valid = match pair.split_once('/') {
        Some((base, quote)) => {
            base.len() == 3
                && quote.len() == 3
                && base.chars().all(|c| c.is_ascii_uppercase())
                && quote.chars().all(|c| c.is_ascii_uppercase())
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(JournalError::Validation(format!(
            "currency pair must look like \"EUR/USD\", got \"{pair}\""
        )))
    }
}

fn month_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let year = now.year();
    let month = now.month();
    let start = first_of_month(year, month);
    let end = if month == 12 {
        first_of_month(year + 1, 1)
    } else {
        first_of_month(year, month + 1)
    };
    (start, end)
}

fn first_of_month(year: i32, month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn day_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let date = now.date_naive();
    let start = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is valid"));
    (start, start + chrono::Duration::days(1))
}
