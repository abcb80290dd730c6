use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::JournalError;
use crate::models::ChecklistTimeframe;

/// One weighted checklist criterion. Weight is in percentage points and is
/// validated strictly positive at the data-entry seam, never by the scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub weight: f64,
}

impl ChecklistItem {
    fn new(id: &str, label: &str, description: &str, weight: f64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            description: Some(description.to_string()),
            weight,
        }
    }
}

/// The item definitions: five fixed timeframe buckets plus the user-managed
/// custom bucket. Ids are unique across the whole checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checklist {
    pub weekly: Vec<ChecklistItem>,
    pub daily: Vec<ChecklistItem>,
    pub four_hour: Vec<ChecklistItem>,
    pub lower_tf: Vec<ChecklistItem>,
    pub entry: Vec<ChecklistItem>,
    pub custom: Vec<ChecklistItem>,
    #[serde(default)]
    custom_counter: u64,
}

impl Checklist {
    /// The standard setup checklist shipped with the app.
    pub fn standard() -> Self {
        let weekly = vec![
            ChecklistItem::new(
                "w1",
                "Trend",
                "Is the weekly trend clearly identified (uptrend/downtrend)?",
                10.0,
            ),
            ChecklistItem::new(
                "w2",
                "At AOI / Rejected",
                "Is price at Area of Interest or rejected from it?",
                10.0,
            ),
            ChecklistItem::new(
                "w3",
                "Touching EMA",
                "Is price touching or near key EMA (50/200)?",
                5.0,
            ),
            ChecklistItem::new(
                "w4",
                "Round Psychological Level",
                "Is price near a round psychological level (e.g., 1.0000, 1.1000)?",
                5.0,
            ),
            ChecklistItem::new(
                "w5",
                "Rejection from Previous Structure",
                "Has price rejected from previous weekly structure (S/R)?",
                10.0,
            ),
            ChecklistItem::new(
                "w6",
                "Candlestick Rejection from AOI",
                "Is there a strong candlestick rejection pattern from AOI?",
                10.0,
            ),
            ChecklistItem::new(
                "w7",
                "Break & Retest / Head & Shoulders Pattern",
                "Is there a break & retest or H&S pattern confirmation?",
                10.0,
            ),
        ];

        let daily = vec![
            ChecklistItem::new(
                "d1",
                "Trend",
                "Is the daily trend clearly identified and aligned with weekly?",
                10.0,
            ),
            ChecklistItem::new(
                "d2",
                "At AOI / Rejected",
                "Is price at Area of Interest or rejected from it?",
                10.0,
            ),
            ChecklistItem::new(
                "d3",
                "Touching EMA",
                "Is price touching or near key EMA (50/200)?",
                5.0,
            ),
            ChecklistItem::new(
                "d4",
                "Round Psychological Level",
                "Is price near a round psychological level?",
                5.0,
            ),
            ChecklistItem::new(
                "d5",
                "Rejection from Previous Structure",
                "Has price rejected from previous daily structure (S/R)?",
                10.0,
            ),
            ChecklistItem::new(
                "d6",
                "Candlestick Rejection from AOI",
                "Is there a strong candlestick rejection pattern from AOI?",
                10.0,
            ),
            ChecklistItem::new(
                "d7",
                "Break & Retest / Head & Shoulders Pattern",
                "Is there a break & retest or H&S pattern confirmation?",
                10.0,
            ),
        ];

        let four_hour = vec![
            ChecklistItem::new(
                "4h1",
                "Trend",
                "Is the 4H trend clearly identified and aligned with daily?",
                5.0,
            ),
            ChecklistItem::new(
                "4h2",
                "At AOI / Rejected",
                "Is price at Area of Interest or rejected from it?",
                5.0,
            ),
            ChecklistItem::new(
                "4h3",
                "Touching EMA",
                "Is price touching or near key EMA (50/200)?",
                5.0,
            ),
            ChecklistItem::new(
                "4h4",
                "Round Psychological Level",
                "Is price near a round psychological level?",
                5.0,
            ),
            ChecklistItem::new(
                "4h5",
                "Rejection from Previous Structure",
                "Has price rejected from previous 4H structure (S/R)?",
                10.0,
            ),
            ChecklistItem::new(
                "4h6",
                "Candlestick Rejection from AOI",
                "Is there a strong candlestick rejection pattern from AOI?",
                5.0,
            ),
            ChecklistItem::new(
                "4h7",
                "Break & Retest / Head & Shoulders Pattern",
                "Is there a break & retest or H&S pattern confirmation?",
                10.0,
            ),
        ];

        let lower_tf = vec![
            ChecklistItem::new(
                "2h1",
                "Trend",
                "Is the 2H/1H/30m trend aligned with higher timeframes?",
                5.0,
            ),
            ChecklistItem::new(
                "2h2",
                "Touching EMA",
                "Is price touching or near key EMA on these timeframes?",
                5.0,
            ),
            ChecklistItem::new(
                "2h3",
                "Break & Retest / Head & Shoulders Pattern",
                "Is there a break & retest or H&S pattern confirmation?",
                5.0,
            ),
        ];

        let entry = vec![
            ChecklistItem::new(
                "e1",
                "SOS",
                "Is there a clear Sign of Strength (bullish) or Sign of Weakness (bearish)?",
                10.0,
            ),
            ChecklistItem::new(
                "e2",
                "Engulfing Candlestick (30m, 1H, 2H, 4H)",
                "Is there a strong engulfing candlestick pattern on relevant timeframes?",
                10.0,
            ),
        ];

        Self {
            weekly,
            daily,
            four_hour,
            lower_tf,
            entry,
            custom: Vec::new(),
            custom_counter: 0,
        }
    }

    pub fn bucket(&self, tf: ChecklistTimeframe) -> &[ChecklistItem] {
        match tf {
            ChecklistTimeframe::Weekly => &self.weekly,
            ChecklistTimeframe::Daily => &self.daily,
            ChecklistTimeframe::FourHour => &self.four_hour,
            ChecklistTimeframe::LowerTf => &self.lower_tf,
            ChecklistTimeframe::Entry => &self.entry,
            ChecklistTimeframe::Custom => &self.custom,
        }
    }

    /// Every bucket in display order, custom last.
    pub fn buckets(&self) -> impl Iterator<Item = (ChecklistTimeframe, &[ChecklistItem])> {
        ChecklistTimeframe::default_buckets()
            .into_iter()
            .chain([ChecklistTimeframe::Custom])
            .map(move |tf| (tf, self.bucket(tf)))
    }

    pub fn find(&self, id: &str) -> Option<&ChecklistItem> {
        self.buckets()
            .flat_map(|(_, items)| items)
            .find(|item| item.id == id)
    }

    /// Append a user-defined criterion. Weight must be strictly positive.
    pub fn add_custom(&mut self, label: &str, weight: f64) -> Result<&ChecklistItem, JournalError> {
        if label.trim().is_empty() {
            return Err(JournalError::Validation(
                "custom checklist item needs a label".to_string(),
            ));
        }
        if weight <= 0.0 {
            return Err(JournalError::Validation(format!(
                "checklist item weight must be positive, got {weight}"
            )));
        }
        self.custom_counter += 1;
        self.custom.push(ChecklistItem {
            id: format!("c{}", self.custom_counter),
            label: label.trim().to_string(),
            description: None,
            weight,
        });
        Ok(self.custom.last().expect("just pushed"))
    }

    /// Remove a custom criterion. Returns false if the id was not a custom
    /// item; the fixed buckets cannot be edited.
    pub fn delete_custom(&mut self, id: &str) -> bool {
        let before = self.custom.len();
        self.custom.retain(|item| item.id != id);
        self.custom.len() != before
    }
}

/// The checked/unchecked state tracked separately from item definitions.
#[derive(Debug, Clone, Default)]
pub struct ChecklistState {
    checked: HashSet<String>,
}

impl ChecklistState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.checked.contains(id)
    }

    pub fn checked_ids(&self) -> &HashSet<String> {
        &self.checked
    }

    /// Flip an item. Returns the new checked state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.checked.remove(id) {
            self.checked.insert(id.to_string());
            true
        } else {
            false
        }
    }

    /// Flip an item with a confirmation gate on the unchecked -> checked
    /// direction ("have you completed this step?"). Unchecking never asks.
    pub fn toggle_confirmed<F>(&mut self, item: &ChecklistItem, confirm: F) -> bool
    where
        F: FnOnce(&ChecklistItem) -> bool,
    {
        if self.checked.contains(&item.id) {
            self.checked.remove(&item.id);
            false
        } else if confirm(item) {
            self.checked.insert(item.id.clone());
            true
        } else {
            false
        }
    }

    /// Drop a checked id whose item no longer exists (custom item deleted).
    pub fn forget(&mut self, id: &str) {
        self.checked.remove(id);
    }

    pub fn reset(&mut self) {
        self.checked.clear();
    }
}
