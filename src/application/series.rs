//! Synthetic load and pricing series.
//!
//! All data is derived from closed-form formulas seeded by the target
//! date; there is no real data source behind the dashboard.

use crate::domain::model::{DailyStats, HourlySlot};
use chrono::{Datelike, NaiveDate, Weekday};

pub const PEAK_THRESHOLD: u32 = 15_000; // MW
pub const PEAK_HOURS_MORNING: (u32, u32) = (9, 12);
pub const PEAK_HOURS_EVENING: (u32, u32) = (18, 21);

/// Load in MW for one hour of the given date.
///
/// A sine-wave base with peak-window bumps, reduced on weekends.
pub fn load_for_hour(hour: u32, date: NaiveDate) -> u32 {
    let is_high_demand = (PEAK_HOURS_MORNING.0..=PEAK_HOURS_MORNING.1).contains(&hour)
        || (PEAK_HOURS_EVENING.0..=PEAK_HOURS_EVENING.1).contains(&hour);

    let base_load = 13_000.0 + (hour as f64 * std::f64::consts::PI / 12.0).sin() * 3_000.0;
    let peak_load = if is_high_demand { 2_000.0 } else { 0.0 };

    let is_weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
    let weekend_reduction = if is_weekend { 0.85 } else { 1.0 };

    ((base_load + peak_load) * weekend_reduction).round() as u32
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub term_ahead_price: f64,
    pub real_time_price: f64,
    pub saving: f64,
}

/// Prices derived from load. The term-ahead price is 95% of the base
/// price; the real-time price grows 10% per day of lead time.
pub fn price_for_load(load: u32, days_to_target: i64) -> PriceBreakdown {
    let base_price = 3.0
        + if load > PEAK_THRESHOLD { 2.0 } else { 0.0 }
        + load as f64 / PEAK_THRESHOLD as f64;

    let term_ahead_price = round2(base_price * 0.95);
    let future_factor = 1.0 + days_to_target as f64 * 0.1;
    let real_time_price = round2(term_ahead_price * future_factor);

    PriceBreakdown {
        term_ahead_price,
        real_time_price,
        saving: round2(real_time_price - term_ahead_price),
    }
}

/// 24 hourly slots for a target date, priced relative to `base_date`.
pub fn hourly_data(target: NaiveDate, base_date: NaiveDate) -> Vec<HourlySlot> {
    let days_to_target = (target - base_date).num_days();

    (0..24)
        .map(|hour| {
            let load = load_for_hour(hour, target);
            let prices = price_for_load(load, days_to_target);
            HourlySlot {
                time_slot: format!("{:02}:00", hour),
                load,
                term_ahead_price: prices.term_ahead_price,
                real_time_price: prices.real_time_price,
                saving: prices.saving,
            }
        })
        .collect()
}

pub fn daily_stats(data: &[HourlySlot]) -> DailyStats {
    if data.is_empty() {
        return DailyStats {
            total_load: 0,
            peak_load: 0,
            avg_load: 0,
            avg_term_ahead: 0.0,
            avg_real_time: 0.0,
            total_savings: 0,
        };
    }

    let total_load: u64 = data.iter().map(|s| s.load as u64).sum();
    let peak_load = data.iter().map(|s| s.load).max().unwrap_or(0);
    let avg_load = (total_load as f64 / data.len() as f64).round() as u32;

    let avg_term_ahead = round2(
        data.iter().map(|s| s.term_ahead_price).sum::<f64>() / data.len() as f64,
    );
    let avg_real_time = round2(
        data.iter().map(|s| s.real_time_price).sum::<f64>() / data.len() as f64,
    );

    // Savings weighted by load, in per-GWh terms
    let total_savings = data
        .iter()
        .map(|s| s.saving * (s.load as f64 / 1000.0))
        .sum::<f64>()
        .round() as i64;

    DailyStats {
        total_load,
        peak_load,
        avg_load,
        avg_term_ahead,
        avg_real_time,
        total_savings,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
