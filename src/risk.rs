use std::fmt;

use serde::{Deserialize, Serialize};

/// Every supported pair is quoted at $10 per pip per standard lot.
const PIP_VALUE_USD: f64 = 10.0;

/// Position size in standard lots, formatted for display with the
/// micro/mini banding the journal shows next to the size field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LotSize {
    pub standard_lots: f64,
}

impl fmt::Display for LotSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lots = self.standard_lots;
        if lots < 0.01 {
            let micro = (lots * 1000.0).round();
            write!(f, "{micro} micro lots ({lots:.4} lots)")
        } else if lots < 0.1 {
            write!(f, "{:.2} mini lots ({lots:.3} lots)", lots * 100.0)
        } else if lots < 1.0 {
            write!(f, "{lots:.3} lots")
        } else {
            write!(f, "{lots:.2} lots")
        }
    }
}

/// Dollar amount put at risk for a balance and risk percentage.
pub fn risk_amount(account_balance: f64, risk_percentage: f64) -> f64 {
    account_balance * risk_percentage / 100.0
}

/// Position size from balance, risk percent, and stop distance in pips.
/// `None` when any input is missing its positive value — the UI shows a
/// "fill in the stop loss" hint instead of a number.
pub fn lot_size(
    account_balance: f64,
    risk_percentage: f64,
    stop_loss_pips: f64,
) -> Option<LotSize> {
    if account_balance <= 0.0 || risk_percentage <= 0.0 || stop_loss_pips <= 0.0 {
        return None;
    }
    let risk = risk_amount(account_balance, risk_percentage);
    Some(LotSize {
        standard_lots: risk / (stop_loss_pips * PIP_VALUE_USD),
    })
}
