use serde::{Deserialize, Serialize};

/// Result of one planning call. Plain data; the caller owns it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub steps: Vec<Step>,
    pub shopping_list: ShoppingList,
    pub summary: Summary,
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub time: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub high_priority: Vec<ListEntry>,
    pub general_items: Vec<ListEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub name: String,
    pub status: bool,
}

impl ListEntry {
    pub fn unchecked(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListTier {
    HighPriority,
    GeneralItems,
}

impl ShoppingList {
    pub fn tier_mut(&mut self, tier: ListTier) -> &mut Vec<ListEntry> {
        match tier {
            ListTier::HighPriority => &mut self.high_priority,
            ListTier::GeneralItems => &mut self.general_items,
        }
    }

    /// Flips the first entry called `name` and returns its new status.
    pub fn toggle(&mut self, tier: ListTier, name: &str) -> Option<bool> {
        let entry = self.tier_mut(tier).iter_mut().find(|entry| entry.name == name)?;
        entry.status = !entry.status;
        Some(entry.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub estimated_total_time: String,
    pub number_of_stops: u32,
    pub efficiency_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Traffic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}
