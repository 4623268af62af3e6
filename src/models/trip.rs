use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;

pub const DEFAULT_CHECKOUT_MINUTES: u32 = 10;

/// Everything the planner needs to lay out one outing.
///
/// Item order is significant: it is the selection priority within a tier.
/// Item names are expected to be unique per tier since status toggling
/// matches by name; the planner itself does not check this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub current_time: ClockTime,
    pub total_free_time_minutes: u32,
    pub travel_time_to_market_minutes: u32,
    pub travel_time_from_market_minutes: u32,
    #[serde(default)]
    pub essential_items: Vec<Item>,
    #[serde(default)]
    pub optional_items: Vec<Item>,
    #[serde(default = "default_checkout_minutes")]
    pub average_checkout_minutes: u32,
    #[serde(default)]
    pub peak_traffic_windows: Vec<TrafficWindow>,
}

fn default_checkout_minutes() -> u32 {
    DEFAULT_CHECKOUT_MINUTES
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    pub estimated_minutes: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, estimated_minutes: u32) -> Self {
        Self {
            name: name.into(),
            estimated_minutes,
        }
    }
}

/// Congestion interval, closed at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TrafficWindow {
    pub fn contains(&self, time: ClockTime) -> bool {
        time.is_within(self.start, self.end)
    }
}

impl TripRequest {
    /// The trip shown on first launch, before anything has been planned.
    pub fn sample() -> Self {
        Self {
            current_time: ClockTime::fixed(16, 0),
            total_free_time_minutes: 120,
            travel_time_to_market_minutes: 15,
            travel_time_from_market_minutes: 20,
            essential_items: vec![
                Item::new("Organic Whole Milk", 10),
                Item::new("Free-range Eggs (12pk)", 15),
            ],
            optional_items: vec![
                Item::new("Avocados (3)", 5),
                Item::new("Whole Grain Sourdough", 5),
            ],
            average_checkout_minutes: DEFAULT_CHECKOUT_MINUTES,
            peak_traffic_windows: vec![TrafficWindow {
                start: ClockTime::fixed(17, 0),
                end: ClockTime::fixed(18, 30),
            }],
        }
    }
}
