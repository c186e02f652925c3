//! Synthetic load/price formula tests.

use chrono::NaiveDate;
use wattson::application::series::{
    daily_stats, hourly_data, load_for_hour, price_for_load, PEAK_THRESHOLD,
};
use wattson::domain::model::HourlySlot;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn saturday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 4).unwrap()
}

#[test]
fn weekend_load_is_reduced() {
    // Hour 0 has no sine or peak component, so the factor is visible directly
    assert_eq!(load_for_hour(0, monday()), 13_000);
    assert_eq!(load_for_hour(0, saturday()), 11_050);
}

#[test]
fn peak_windows_raise_load() {
    // 18:00 is inside the evening window, neighbors outside it carry
    // a larger sine term yet still come out lower
    assert!(load_for_hour(18, monday()) > load_for_hour(17, monday()));
    assert!(load_for_hour(21, monday()) > load_for_hour(22, monday()));
}

#[test]
fn load_above_threshold_carries_surcharge() {
    let cheap = price_for_load(14_000, 0);
    let pricey = price_for_load(16_000, 0);

    assert_eq!(cheap.term_ahead_price, 3.74);
    assert_eq!(pricey.term_ahead_price, 5.76);

    // Exactly at the threshold the surcharge does not apply
    let edge = price_for_load(PEAK_THRESHOLD, 0);
    assert_eq!(edge.term_ahead_price, 3.8);
}

#[test]
fn future_days_inflate_real_time_price() {
    let today = price_for_load(15_000, 0);
    assert_eq!(today.real_time_price, today.term_ahead_price);
    assert_eq!(today.saving, 0.0);

    let in_two_days = price_for_load(15_000, 2);
    assert_eq!(in_two_days.real_time_price, 4.56);
    assert_eq!(in_two_days.saving, 0.76);
}

#[test]
fn hourly_data_covers_the_day() {
    let data = hourly_data(monday(), monday());

    assert_eq!(data.len(), 24);
    assert_eq!(data[0].time_slot, "00:00");
    assert_eq!(data[23].time_slot, "23:00");

    // Same-day pricing has no future factor
    for slot in &data {
        assert_eq!(slot.real_time_price, slot.term_ahead_price);
    }
}

#[test]
fn daily_stats_aggregates() {
    let slot = |load: u32, term: f64, real: f64| HourlySlot {
        time_slot: "00:00".to_string(),
        load,
        term_ahead_price: term,
        real_time_price: real,
        saving: real - term,
    };

    let stats = daily_stats(&[slot(1_000, 3.0, 4.0), slot(3_000, 5.0, 6.0)]);

    assert_eq!(stats.total_load, 4_000);
    assert_eq!(stats.peak_load, 3_000);
    assert_eq!(stats.avg_load, 2_000);
    assert_eq!(stats.avg_term_ahead, 4.0);
    assert_eq!(stats.avg_real_time, 5.0);
    assert_eq!(stats.total_savings, 4);
}

#[test]
fn daily_stats_on_empty_input() {
    let stats = daily_stats(&[]);
    assert_eq!(stats.total_load, 0);
    assert_eq!(stats.peak_load, 0);
    assert_eq!(stats.total_savings, 0);
}
