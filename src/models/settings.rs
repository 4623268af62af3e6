use crate::clock::ClockTime;

/// Fallbacks the trip form applies to whatever the user left out.
#[derive(Debug, Clone)]
pub struct IntakeDefaults {
    pub travel_minutes: u32,
    pub return_trip_buffer_minutes: u32,
    pub essential_item_minutes: u32,
    pub optional_item_minutes: u32,
    pub traffic_start: ClockTime,
    pub traffic_end: ClockTime,
}

impl Default for IntakeDefaults {
    fn default() -> Self {
        Self {
            travel_minutes: 15,
            return_trip_buffer_minutes: 5,
            essential_item_minutes: 10,
            optional_item_minutes: 5,
            traffic_start: ClockTime::fixed(17, 0),
            traffic_end: ClockTime::fixed(18, 30),
        }
    }
}
