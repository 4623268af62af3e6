//! Trip planning: fits shopping into a fixed time budget around travel and
//! checkout, lays out the itinerary, and scores the result.

pub mod selection;

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    clock::{format_duration, ClockTime},
    models::{
        plan::{Alert, AlertKind, ListEntry, Severity, ShoppingList, Step, Summary, TripPlan},
        trip::{TrafficWindow, TripRequest},
    },
};

pub use selection::{FirstFit, ItemSelector, Selection};

const TRAFFIC_DEDUCTION: i64 = 15;
const HIGH_UTILIZATION_DEDUCTION: i64 = 5;
const DROPPED_OPTIONAL_DEDUCTION: i64 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("invalid time of day: {0:?}")]
    InvalidTime(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// How the free time splits between fixed overhead and shopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    pub round_trip_minutes: u64,
    pub overhead_minutes: u64,
    /// Negative when overhead alone exceeds the free time.
    pub remaining_shopping_minutes: i64,
}

impl Budget {
    pub fn for_request(request: &TripRequest) -> Self {
        let round_trip_minutes = u64::from(request.travel_time_to_market_minutes)
            + u64::from(request.travel_time_from_market_minutes);
        let overhead_minutes = round_trip_minutes + u64::from(request.average_checkout_minutes);
        let remaining_shopping_minutes =
            i64::from(request.total_free_time_minutes) - overhead_minutes as i64;
        Self {
            round_trip_minutes,
            overhead_minutes,
            remaining_shopping_minutes,
        }
    }

    /// No shopping time is left once travel and checkout are paid for.
    pub fn is_infeasible(&self) -> bool {
        self.remaining_shopping_minutes <= 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timeline {
    departure: ClockTime,
    arrival_at_market: ClockTime,
    shopping_end: ClockTime,
    departure_from_market: ClockTime,
    arrival_home: ClockTime,
}

impl Timeline {
    fn build(request: &TripRequest, used_shopping_minutes: u64) -> Self {
        let departure = request.current_time;
        let arrival_at_market =
            departure.add_minutes(u64::from(request.travel_time_to_market_minutes));
        let shopping_end = arrival_at_market.add_minutes(used_shopping_minutes);
        let departure_from_market = arrival_at_market
            .add_minutes(used_shopping_minutes + u64::from(request.average_checkout_minutes));
        let arrival_home =
            departure_from_market.add_minutes(u64::from(request.travel_time_from_market_minutes));
        Self {
            departure,
            arrival_at_market,
            shopping_end,
            departure_from_market,
            arrival_home,
        }
    }
}

/// Plans trips with a pluggable item selection strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planner<S = FirstFit> {
    selector: S,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: ItemSelector> Planner<S> {
    pub fn with_selector(selector: S) -> Self {
        Self { selector }
    }

    pub fn plan(&self, request: &TripRequest) -> Result<TripPlan, PlanError> {
        validate(request)?;

        let budget = Budget::for_request(request);
        debug!(
            overhead = budget.overhead_minutes,
            remaining = budget.remaining_shopping_minutes,
            "computed trip budget"
        );
        if budget.is_infeasible() {
            warn!(
                free = request.total_free_time_minutes,
                overhead = budget.overhead_minutes,
                "no shopping time left after travel and checkout"
            );
        }

        let essentials = self
            .selector
            .select_items(&request.essential_items, budget.remaining_shopping_minutes);
        if essentials.dropped_any(&request.essential_items) {
            let dropped: Vec<&str> = request
                .essential_items
                .iter()
                .filter(|item| !essentials.selected.iter().any(|kept| std::ptr::eq(*kept, *item)))
                .map(|item| item.name.as_str())
                .collect();
            warn!(?dropped, "essential items do not fit the time budget");
        }

        let optional_budget = budget.remaining_shopping_minutes - essentials.used_minutes as i64;
        let optionals = self
            .selector
            .select_items(&request.optional_items, optional_budget);
        let optionals_dropped = optionals.dropped_any(&request.optional_items);

        let used_shopping_minutes = essentials.used_minutes + optionals.used_minutes;
        let consumed_minutes = used_shopping_minutes + budget.overhead_minutes;
        debug!(
            essentials = essentials.selected.len(),
            optionals = optionals.selected.len(),
            used_shopping_minutes,
            "selected items"
        );

        let timeline = Timeline::build(request, used_shopping_minutes);
        let (alert, traffic_deduction) = check_traffic(&request.peak_traffic_windows, &timeline);

        let efficiency_score = efficiency_score(
            traffic_deduction,
            consumed_minutes,
            request.total_free_time_minutes,
            optionals_dropped,
        );

        Ok(TripPlan {
            steps: build_steps(request, &timeline, optionals_dropped),
            shopping_list: ShoppingList {
                high_priority: to_entries(&essentials),
                general_items: to_entries(&optionals),
            },
            summary: Summary {
                estimated_total_time: format_duration(consumed_minutes),
                number_of_stops: 1,
                efficiency_score,
            },
            alerts: alert.into_iter().collect(),
        })
    }
}

/// Plans `request` with first-fit item selection.
pub fn plan_trip(request: &TripRequest) -> Result<TripPlan, PlanError> {
    Planner::new().plan(request)
}

fn validate(request: &TripRequest) -> Result<(), PlanError> {
    let items = request
        .essential_items
        .iter()
        .chain(request.optional_items.iter());
    for item in items {
        if item.name.trim().is_empty() {
            return Err(PlanError::InvalidInput("item name must not be empty".into()));
        }
    }
    Ok(())
}

fn to_entries(selection: &Selection<'_>) -> Vec<ListEntry> {
    selection
        .selected
        .iter()
        .map(|item| ListEntry::unchecked(item.name.clone()))
        .collect()
}

fn build_steps(request: &TripRequest, timeline: &Timeline, optionals_dropped: bool) -> Vec<Step> {
    let shopping_note = if optionals_dropped {
        "Essential items prioritized (Time limited)"
    } else {
        "Essential items prioritized"
    };

    vec![
        Step {
            time: timeline.departure.to_12h(),
            title: "Depart Office".into(),
            description: format!(
                "Commute to market ({} mins)",
                request.travel_time_to_market_minutes
            ),
        },
        Step {
            time: format!(
                "{} \u{2013} {}",
                timeline.arrival_at_market.to_12h(),
                timeline.shopping_end.to_12h()
            ),
            title: "Grocery Shopping".into(),
            description: shopping_note.into(),
        },
        Step {
            time: timeline.shopping_end.to_12h(),
            title: "Checkout & Loading".into(),
            description: format!(
                "Estimated wait time: {} mins",
                request.average_checkout_minutes
            ),
        },
        Step {
            time: timeline.departure_from_market.to_12h(),
            title: "Return Home".into(),
            description: format!("Expected arrival: {}", timeline.arrival_home.to_12h()),
        },
    ]
}

/// Every window touching the drive home costs points, but only the last
/// matching window is reported.
fn check_traffic(windows: &[TrafficWindow], timeline: &Timeline) -> (Option<Alert>, i64) {
    let mut alert = None;
    let mut deduction = 0;
    for window in windows {
        if window.contains(timeline.departure_from_market) || window.contains(timeline.arrival_home)
        {
            alert = Some(Alert {
                kind: AlertKind::Traffic,
                severity: Severity::Warning,
                message: format!(
                    "Heavy congestion expected between {} and {}.",
                    window.start.to_12h(),
                    window.end.to_12h()
                ),
            });
            deduction += TRAFFIC_DEDUCTION;
        }
    }
    (alert, deduction)
}

fn efficiency_score(
    traffic_deduction: i64,
    consumed_minutes: u64,
    total_free_minutes: u32,
    optionals_dropped: bool,
) -> u8 {
    let mut score = 100 - traffic_deduction;
    // utilization above 90%, kept in integers so a zero budget needs no special case
    if u128::from(consumed_minutes) * 10 > u128::from(total_free_minutes) * 9 {
        score -= HIGH_UTILIZATION_DEDUCTION;
    }
    if optionals_dropped {
        score -= DROPPED_OPTIONAL_DEDUCTION;
    }
    score.clamp(0, 100) as u8
}
