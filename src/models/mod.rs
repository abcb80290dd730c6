pub mod direction;
pub mod settings;
pub mod timeframe;
pub mod trade;

pub use direction::{Direction, TradeStatus};
pub use settings::UserSettings;
pub use timeframe::ChecklistTimeframe;
pub use trade::{NewTrade, Trade, TradeDraft, TradeOutcome, TradePatch};
