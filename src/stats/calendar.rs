use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Trade;

/// One calendar cell: everything that closed on a given UTC date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingDay {
    pub date: NaiveDate,
    pub profit: f64,
    pub trades: Vec<Trade>,
    /// Whole percent for the day.
    pub win_rate: f64,
}

/// One point of the monthly P&L series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPnL {
    /// "Mar 2025"-style label.
    pub month: String,
    pub profit: f64,
    pub trades: usize,
}

/// One row of the month view. Week numbers partition the month by
/// day-of-month (`ceil(day / 7)`), not ISO calendar weeks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week: u32,
    pub profit: f64,
    pub days: usize,
    pub trades: usize,
}

/// Group closed trades by the UTC calendar date of `created_at`,
/// optionally restricted to a year and/or month (1-12).
pub fn bucket_by_day(
    trades: &[Trade],
    year: Option<i32>,
    month: Option<u32>,
) -> BTreeMap<NaiveDate, TradingDay> {
    let mut days: BTreeMap<NaiveDate, TradingDay> = BTreeMap::new();

    for trade in trades.iter().filter(|t| t.is_closed()) {
        let date = trade.created_at.date_naive();
        if let Some(y) = year {
            if date.year() != y {
                continue;
            }
        }
        if let Some(m) = month {
            if date.month() != m {
                continue;
            }
        }

        let day = days.entry(date).or_insert_with(|| TradingDay {
            date,
            profit: 0.0,
            trades: Vec::new(),
            win_rate: 0.0,
        });
        day.profit += trade.pnl();
        day.trades.push(trade.clone());
    }

    for day in days.values_mut() {
        let wins = day.trades.iter().filter(|t| t.is_win()).count();
        day.win_rate = (wins as f64 / day.trades.len() as f64 * 100.0).round();
    }

    days
}

/// Calendar-month P&L series, ascending, truncated to the most recent
/// `months_back` entries.
pub fn monthly_pnl(trades: &[Trade], months_back: usize) -> Vec<MonthlyPnL> {
    let mut months: BTreeMap<(i32, u32), MonthlyPnL> = BTreeMap::new();

    for trade in trades.iter().filter(|t| t.is_closed()) {
        let date = trade.created_at.date_naive();
        let entry = months
            .entry((date.year(), date.month()))
            .or_insert_with(|| MonthlyPnL {
                month: date.format("%b %Y").to_string(),
                profit: 0.0,
                trades: 0,
            });
        entry.profit += trade.pnl();
        entry.trades += 1;
    }

    let series: Vec<MonthlyPnL> = months.into_values().collect();
    let skip = series.len().saturating_sub(months_back);
    series.into_iter().skip(skip).collect()
}

/// Roll the day buckets of one month up into week rows. Every week of the
/// month appears — `ceil(days_in_month / 7)` rows — even when nothing was
/// traded in it.
pub fn weekly_summary(
    days: &BTreeMap<NaiveDate, TradingDay>,
    year: i32,
    month: u32,
) -> Vec<WeeklySummary> {
    let Some(total_days) = days_in_month(year, month) else {
        return Vec::new();
    };
    let week_count = total_days.div_ceil(7);

    let mut weeks: Vec<WeeklySummary> = (1..=week_count)
        .map(|week| WeeklySummary {
            week,
            profit: 0.0,
            days: 0,
            trades: 0,
        })
        .collect();

    for day in days.values() {
        if day.date.year() != year || day.date.month() != month {
            continue;
        }
        let week = day.date.day().div_ceil(7);
        let row = &mut weeks[(week - 1) as usize];
        row.profit += day.profit;
        row.days += 1;
        row.trades += day.trades.len();
    }

    weeks
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}
