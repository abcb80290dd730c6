use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Trade;

/// Aggregate outcome of one currency pair. Breakeven trades count toward
/// `trades` but toward neither `wins` nor `losses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairPerformance {
    pub pair: String,
    pub profit: f64,
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
}

/// Best and worst pair by summed profit. Both are `None` with no closed
/// trades; with a single distinct pair the same entry fills both slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairReport {
    pub best: Option<PairPerformance>,
    pub worst: Option<PairPerformance>,
}

pub fn best_worst_pairs(trades: &[Trade]) -> PairReport {
    let mut stats: BTreeMap<String, PairPerformance> = BTreeMap::new();

    for trade in trades.iter().filter(|t| t.is_closed()) {
        let entry = stats
            .entry(trade.currency_pair.clone())
            .or_insert_with(|| PairPerformance {
                pair: trade.currency_pair.clone(),
                profit: 0.0,
                trades: 0,
                wins: 0,
                losses: 0,
                win_rate: 0.0,
            });
        entry.profit += trade.pnl();
        entry.trades += 1;
        if trade.pnl() > 0.0 {
            entry.wins += 1;
        } else if trade.pnl() < 0.0 {
            entry.losses += 1;
        }
    }

    for entry in stats.values_mut() {
        entry.win_rate = (entry.wins as f64 / entry.trades as f64 * 100.0).round();
    }

    let mut best: Option<&PairPerformance> = None;
    let mut worst: Option<&PairPerformance> = None;
    for perf in stats.values() {
        match best {
            Some(b) if perf.profit <= b.profit => {}
            _ => best = Some(perf),
        }
        match worst {
            Some(w) if perf.profit >= w.profit => {}
            _ => worst = Some(perf),
        }
    }

    PairReport {
        best: best.cloned(),
        worst: worst.cloned(),
    }
}
