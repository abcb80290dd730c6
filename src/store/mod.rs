pub mod memory;

pub use memory::MemoryStore;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{NewTrade, Trade, TradePatch, TradeStatus, UserSettings};

/// Query filter for `TradeStore::query`. `since` is inclusive, `until`
/// exclusive; results come back in ascending `created_at` order.
#[derive(Debug, Clone, Default)]
pub struct TradeFilter {
    pub user_id: Option<String>,
    pub status: Option<TradeStatus>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl TradeFilter {
    pub fn for_user(user_id: &str) -> Self {
        TradeFilter {
            user_id: Some(user_id.to_string()),
            ..Default::default()
        }
    }

    pub fn closed_for(user_id: &str) -> Self {
        TradeFilter {
            user_id: Some(user_id.to_string()),
            status: Some(TradeStatus::Closed),
            ..Default::default()
        }
    }

    pub fn between(mut self, since: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self.until = Some(until);
        self
    }
}

/// The persistence collaborator. The real implementation lives outside
/// this crate (the managed backend); `MemoryStore` backs tests and
/// embeddings without one.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Persist a new record; the store assigns id and timestamps.
    async fn insert(&self, new: NewTrade) -> Result<Trade>;
    /// Apply a partial update and bump `updated_at`.
    async fn update(&self, id: &str, patch: TradePatch) -> Result<Trade>;
    /// Hard delete. There is no soft-delete or undo.
    async fn delete(&self, id: &str) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Trade>>;
    async fn query(&self, filter: &TradeFilter) -> Result<Vec<Trade>>;
}

/// Read-only access to the per-user settings record.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn settings_for(&self, user_id: &str) -> Result<Option<UserSettings>>;
}
