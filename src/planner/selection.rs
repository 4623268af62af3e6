use crate::models::trip::Item;

/// Items a strategy kept, in their original order, plus the minutes they take.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection<'a> {
    pub selected: Vec<&'a Item>,
    pub used_minutes: u64,
}

impl Selection<'_> {
    pub fn dropped_any(&self, offered: &[Item]) -> bool {
        self.selected.len() < offered.len()
    }
}

/// Picks which items of one tier fit into `budget` shopping minutes.
///
/// `budget` may be negative when travel and checkout alone exceed the free time.
pub trait ItemSelector {
    fn select_items<'a>(&self, items: &'a [Item], budget: i64) -> Selection<'a>;
}

/// Walks the items in order and keeps each one that still fits.
///
/// Not an optimal packing: a large item early in the list is skipped for good,
/// and later smaller items are still tried.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

impl ItemSelector for FirstFit {
    fn select_items<'a>(&self, items: &'a [Item], budget: i64) -> Selection<'a> {
        let mut selection = Selection::default();
        for item in items {
            let candidate = selection.used_minutes + u64::from(item.estimated_minutes);
            if i128::from(candidate) <= i128::from(budget) {
                selection.selected.push(item);
                selection.used_minutes = candidate;
            }
        }
        selection
    }
}
