use serde::{Deserialize, Serialize};
use std::fmt;

/// Chart time horizon a checklist bucket belongs to. The serialized names
/// are the labels the snapshot records carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChecklistTimeframe {
    #[serde(rename = "Weekly")]
    Weekly,
    #[serde(rename = "Daily")]
    Daily,
    #[serde(rename = "4H")]
    FourHour,
    #[serde(rename = "2H/1H/30m")]
    LowerTf,
    #[serde(rename = "Entry")]
    Entry,
    #[serde(rename = "Custom")]
    Custom,
}

impl ChecklistTimeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistTimeframe::Weekly => "Weekly",
            ChecklistTimeframe::Daily => "Daily",
            ChecklistTimeframe::FourHour => "4H",
            ChecklistTimeframe::LowerTf => "2H/1H/30m",
            ChecklistTimeframe::Entry => "Entry",
            ChecklistTimeframe::Custom => "Custom",
        }
    }

    /// The five fixed buckets, in display order. Custom is user-managed and
    /// not part of the default set.
    pub fn default_buckets() -> [ChecklistTimeframe; 5] {
        [
            ChecklistTimeframe::Weekly,
            ChecklistTimeframe::Daily,
            ChecklistTimeframe::FourHour,
            ChecklistTimeframe::LowerTf,
            ChecklistTimeframe::Entry,
        ]
    }
}

impl fmt::Display for ChecklistTimeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
