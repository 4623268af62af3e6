use serde::Deserialize;

use crate::{
    clock::ClockTime,
    models::{
        settings::IntakeDefaults,
        trip::{Item, TrafficWindow, TripRequest, DEFAULT_CHECKOUT_MINUTES},
    },
    planner::PlanError,
};

/// Raw fields of the "new trip" form, as posted by the browser.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripForm {
    pub current_time: String,
    pub total_free_time_minutes: u32,
    pub travel_time_minutes: Option<String>,
    #[serde(default)]
    pub essential_items: String,
    #[serde(default)]
    pub optional_items: String,
    pub traffic_start: Option<String>,
    pub traffic_end: Option<String>,
}

impl TripForm {
    pub fn into_request(self, defaults: &IntakeDefaults) -> Result<TripRequest, PlanError> {
        let one_way = self
            .travel_time_minutes
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|minutes| *minutes > 0)
            .unwrap_or(defaults.travel_minutes);
        let return_trip = one_way
            .checked_add(defaults.return_trip_buffer_minutes)
            .ok_or_else(|| PlanError::InvalidInput(format!("travel time {one_way} is too large")))?;

        let window = TrafficWindow {
            start: clock_or(self.traffic_start.as_deref(), defaults.traffic_start)?,
            end: clock_or(self.traffic_end.as_deref(), defaults.traffic_end)?,
        };

        Ok(TripRequest {
            current_time: self.current_time.parse()?,
            total_free_time_minutes: self.total_free_time_minutes,
            travel_time_to_market_minutes: one_way,
            travel_time_from_market_minutes: return_trip,
            essential_items: split_items(&self.essential_items, defaults.essential_item_minutes),
            optional_items: split_items(&self.optional_items, defaults.optional_item_minutes),
            average_checkout_minutes: DEFAULT_CHECKOUT_MINUTES,
            peak_traffic_windows: vec![window],
        })
    }
}

fn clock_or(raw: Option<&str>, fallback: ClockTime) -> Result<ClockTime, PlanError> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value.parse(),
        _ => Ok(fallback),
    }
}

fn split_items(raw: &str, estimated_minutes: u32) -> Vec<Item> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| Item::new(name, estimated_minutes))
        .collect()
}
