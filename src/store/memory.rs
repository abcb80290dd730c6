use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::{NewTrade, Trade, TradePatch, UserSettings};
use crate::store::{SettingsStore, TradeFilter, TradeStore};

/// In-memory trade and settings store. Backs the test suite and any
/// embedding that has no managed backend attached.
#[derive(Default)]
pub struct MemoryStore {
    trades: RwLock<HashMap<String, Trade>>,
    settings: RwLock<HashMap<String, UserSettings>>,
    counter: AtomicU64,
    /// When set, used instead of Utc::now() for assigned timestamps.
    sim_time: RwLock<Option<DateTime<Utc>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the clock so inserted records get deterministic timestamps.
    pub async fn set_sim_time(&self, ts: Option<DateTime<Utc>>) {
        *self.sim_time.write().await = ts;
    }

    pub async fn put_settings(&self, settings: UserSettings) {
        self.settings
            .write()
            .await
            .insert(settings.user_id.clone(), settings);
    }

    async fn now(&self) -> DateTime<Utc> {
        self.sim_time.read().await.unwrap_or_else(Utc::now)
    }
}

#[async_trait]
impl TradeStore for MemoryStore {
    async fn insert(&self, new: NewTrade) -> Result<Trade> {
        let id = format!("t{}", self.counter.fetch_add(1, Ordering::SeqCst) + 1);
        let now = self.now().await;
        let trade = Trade {
            id: id.clone(),
            user_id: new.user_id,
            currency_pair: new.currency_pair,
            direction: new.direction,
            entry_price: new.entry_price,
            stop_loss_price: new.stop_loss_price,
            take_profit_price: new.take_profit_price,
            account_balance: new.account_balance,
            risk_percentage: new.risk_percentage,
            stop_loss_pips: new.stop_loss_pips,
            calculated_lot_size: new.calculated_lot_size,
            confluence_score: new.confluence_score,
            confluence_data: new.confluence_data,
            notes: new.notes,
            chart_image_url: new.chart_image_url,
            after_trade_image_url: None,
            status: new.status,
            profit_loss: None,
            exit_price: None,
            created_at: now,
            updated_at: now,
        };
        self.trades.write().await.insert(id, trade.clone());
        Ok(trade)
    }

    async fn update(&self, id: &str, patch: TradePatch) -> Result<Trade> {
        let now = self.now().await;
        let mut trades = self.trades.write().await;
        let Some(trade) = trades.get_mut(id) else {
            bail!("trade {id} not found");
        };

        if let Some(notes) = patch.notes {
            trade.notes = Some(notes);
        }
        if let Some(url) = patch.chart_image_url {
            trade.chart_image_url = Some(url);
        }
        if let Some(url) = patch.after_trade_image_url {
            trade.after_trade_image_url = Some(url);
        }
        if let Some(status) = patch.status {
            trade.status = status;
        }
        if let Some(pnl) = patch.profit_loss {
            trade.profit_loss = Some(pnl);
        }
        if let Some(price) = patch.exit_price {
            trade.exit_price = Some(price);
        }
        trade.updated_at = now;
        Ok(trade.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        if self.trades.write().await.remove(id).is_none() {
            bail!("trade {id} not found");
        }
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Trade>> {
        Ok(self.trades.read().await.get(id).cloned())
    }

    async fn query(&self, filter: &TradeFilter) -> Result<Vec<Trade>> {
        let trades = self.trades.read().await;
        let mut matched: Vec<Trade> = trades
            .values()
            .filter(|t| {
                filter
                    .user_id
                    .as_ref()
                    .map_or(true, |uid| &t.user_id == uid)
                    && filter.status.map_or(true, |s| t.status == s)
                    && filter.since.map_or(true, |since| t.created_at >= since)
                    && filter.until.map_or(true, |until| t.created_at < until)
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(matched)
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn settings_for(&self, user_id: &str) -> Result<Option<UserSettings>> {
        Ok(self.settings.read().await.get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, TradeStatus};
    use crate::test_helpers::{new_trade_draft, ts};

    #[tokio::test]
    async fn insert_assigns_ids_and_timestamps() {
        let store = MemoryStore::new();
        store.set_sim_time(Some(ts("2025-03-05T10:00:00Z"))).await;

        let a = store
            .insert(new_trade_draft("user-1", "EUR/USD", Direction::Long))
            .await
            .unwrap();
        let b = store
            .insert(new_trade_draft("user-1", "GBP/USD", Direction::Short))
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, ts("2025-03-05T10:00:00Z"));
        assert_eq!(a.status, TradeStatus::Planned);
        assert!(a.profit_loss.is_none());
    }

    #[tokio::test]
    async fn query_filters_by_user_status_and_range() {
        let store = MemoryStore::new();

        store.set_sim_time(Some(ts("2025-03-01T10:00:00Z"))).await;
        let first = store
            .insert(new_trade_draft("user-1", "EUR/USD", Direction::Long))
            .await
            .unwrap();
        store.set_sim_time(Some(ts("2025-03-08T10:00:00Z"))).await;
        store
            .insert(new_trade_draft("user-1", "GBP/USD", Direction::Long))
            .await
            .unwrap();
        store
            .insert(new_trade_draft("user-2", "EUR/USD", Direction::Long))
            .await
            .unwrap();

        let mine = store.query(&TradeFilter::for_user("user-1")).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, first.id, "ascending created_at order");

        let ranged = store
            .query(
                &TradeFilter::for_user("user-1")
                    .between(ts("2025-03-05T00:00:00Z"), ts("2025-03-09T00:00:00Z")),
            )
            .await
            .unwrap();
        assert_eq!(ranged.len(), 1);
        assert_eq!(ranged[0].currency_pair, "GBP/USD");

        let closed = store
            .query(&TradeFilter::closed_for("user-1"))
            .await
            .unwrap();
        assert!(closed.is_empty());
    }

    #[tokio::test]
    async fn update_patches_only_given_fields() {
        let store = MemoryStore::new();
        let trade = store
            .insert(new_trade_draft("user-1", "EUR/USD", Direction::Long))
            .await
            .unwrap();

        let patch = TradePatch {
            status: Some(TradeStatus::Closed),
            profit_loss: Some(120.0),
            after_trade_image_url: Some("https://img.example/after.png".to_string()),
            ..Default::default()
        };
        let updated = store.update(&trade.id, patch).await.unwrap();
        assert_eq!(updated.status, TradeStatus::Closed);
        assert_eq!(updated.profit_loss, Some(120.0));
        assert_eq!(updated.currency_pair, "EUR/USD");
        assert_eq!(updated.notes, trade.notes);
    }

    #[tokio::test]
    async fn delete_removes_and_errors_on_missing() {
        let store = MemoryStore::new();
        let trade = store
            .insert(new_trade_draft("user-1", "EUR/USD", Direction::Long))
            .await
            .unwrap();
        store.delete(&trade.id).await.unwrap();
        assert!(store.get(&trade.id).await.unwrap().is_none());
        assert!(store.delete(&trade.id).await.is_err());
    }
}
