use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checklist::items::{Checklist, ChecklistItem, ChecklistState};
use crate::models::ChecklistTimeframe;

/// Sum of weights of the checked items in one bucket. Empty bucket or empty
/// checked-set scores 0.
pub fn timeframe_score(items: &[ChecklistItem], checked: &HashSet<String>) -> f64 {
    items
        .iter()
        .filter(|item| checked.contains(&item.id))
        .map(|item| item.weight)
        .sum()
}

/// Total across every bucket including custom. Deliberately unclamped:
/// weights can sum past 100 and a 135% setup is a meaningful top-band
/// signal, not an error.
pub fn overall_score(checklist: &Checklist, checked: &HashSet<String>) -> f64 {
    checklist
        .buckets()
        .map(|(_, items)| timeframe_score(items, checked))
        .sum()
}

/// Banding of an overall score, inclusive upper bounds. The exact
/// boundaries matter: moving one reclassifies saved trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetupGrade {
    WeakSetup,
    BelowStandard,
    Moderate,
    Acceptable,
    Good,
    Strong,
    VeryStrong,
    Outstanding,
    Excellent,
    PerfectTrade,
}

impl SetupGrade {
    pub fn for_score(score: f64) -> SetupGrade {
        if score <= 30.0 {
            SetupGrade::WeakSetup
        } else if score <= 55.0 {
            SetupGrade::BelowStandard
        } else if score <= 65.0 {
            SetupGrade::Moderate
        } else if score <= 75.0 {
            SetupGrade::Acceptable
        } else if score <= 85.0 {
            SetupGrade::Good
        } else if score <= 95.0 {
            SetupGrade::Strong
        } else if score <= 115.0 {
            SetupGrade::VeryStrong
        } else if score <= 135.0 {
            SetupGrade::Outstanding
        } else if score <= 155.0 {
            SetupGrade::Excellent
        } else {
            SetupGrade::PerfectTrade
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SetupGrade::WeakSetup => "Weak Setup",
            SetupGrade::BelowStandard => "Below Standard",
            SetupGrade::Moderate => "Moderate",
            SetupGrade::Acceptable => "Acceptable",
            SetupGrade::Good => "Good",
            SetupGrade::Strong => "Strong",
            SetupGrade::VeryStrong => "Very Strong",
            SetupGrade::Outstanding => "Outstanding",
            SetupGrade::Excellent => "Excellent",
            SetupGrade::PerfectTrade => "Perfect Trade",
        }
    }

    /// UI color token for the band.
    pub fn color(&self) -> &'static str {
        match self {
            SetupGrade::WeakSetup => "#EF4444",
            SetupGrade::BelowStandard | SetupGrade::Moderate => "#F59E0B",
            SetupGrade::Acceptable => "#FCD34D",
            SetupGrade::Good | SetupGrade::Strong => "#10B981",
            SetupGrade::VeryStrong
            | SetupGrade::Outstanding
            | SetupGrade::Excellent
            | SetupGrade::PerfectTrade => "#00F5D4",
        }
    }
}

/// One recorded line of a snapshot. Only checked items are recorded, so
/// `checked` is always true; the field is kept because the persisted shape
/// carries it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotItem {
    pub timeframe: ChecklistTimeframe,
    pub label: String,
    pub weight: f64,
    pub checked: bool,
}

/// What was checked at the moment a trade was saved. Unchecked items are
/// not retained: the snapshot can say "this item contributed weight" but
/// not "this item existed and was skipped".
///
/// Invariant: `score` equals the sum of the recorded item weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfluenceSnapshot {
    pub score: f64,
    pub timestamp: DateTime<Utc>,
    pub items: Vec<SnapshotItem>,
}

impl ConfluenceSnapshot {
    /// Record the current checked set, stamped with `ts`.
    pub fn capture_at(
        checklist: &Checklist,
        state: &ChecklistState,
        ts: DateTime<Utc>,
    ) -> ConfluenceSnapshot {
        let checked = state.checked_ids();
        let mut items = Vec::new();
        for (tf, bucket) in checklist.buckets() {
            for item in bucket {
                if checked.contains(&item.id) {
                    items.push(SnapshotItem {
                        timeframe: tf,
                        label: item.label.clone(),
                        weight: item.weight,
                        checked: true,
                    });
                }
            }
        }

        ConfluenceSnapshot {
            score: items.iter().map(|i| i.weight).sum(),
            timestamp: ts,
            items,
        }
    }

    pub fn capture(checklist: &Checklist, state: &ChecklistState) -> ConfluenceSnapshot {
        Self::capture_at(checklist, state, Utc::now())
    }

    /// An empty snapshot for trades saved without touching the checklist.
    pub fn empty_at(ts: DateTime<Utc>) -> ConfluenceSnapshot {
        ConfluenceSnapshot {
            score: 0.0,
            timestamp: ts,
            items: Vec::new(),
        }
    }

    pub fn grade(&self) -> SetupGrade {
        SetupGrade::for_score(self.score)
    }
}
