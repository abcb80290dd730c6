pub mod items;
pub mod score;

pub use items::{Checklist, ChecklistItem, ChecklistState};
pub use score::{overall_score, timeframe_score, ConfluenceSnapshot, SetupGrade, SnapshotItem};
