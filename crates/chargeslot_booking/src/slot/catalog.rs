use jiff::civil::{Time, time};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::time_window::TimeWindow;

/// The eight three-hour windows offered every day, in display order.
pub const STANDARD_WINDOWS: [(Time, Time); 8] = [
    (time(6, 0, 0, 0), time(9, 0, 0, 0)),
    (time(9, 0, 0, 0), time(12, 0, 0, 0)),
    (time(12, 0, 0, 0), time(15, 0, 0, 0)),
    (time(15, 0, 0, 0), time(18, 0, 0, 0)),
    (time(18, 0, 0, 0), time(21, 0, 0, 0)),
    (time(21, 0, 0, 0), time(0, 0, 0, 0)),
    (time(0, 0, 0, 0), time(3, 0, 0, 0)),
    (time(3, 0, 0, 0), time(6, 0, 0, 0)),
];

#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
pub struct SlotCatalog {
    windows: Vec<TimeWindow>,
}

impl SlotCatalog {
    pub fn new(windows: Vec<TimeWindow>) -> Self {
        SlotCatalog { windows }
    }

    pub fn standard() -> Self {
        SlotCatalog::new(
            STANDARD_WINDOWS
                .iter()
                .map(|&(start, end)| TimeWindow::new(start, end))
                .collect(),
        )
    }

    pub fn windows(&self) -> &[TimeWindow] {
        &self.windows
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeWindow> {
        self.windows.iter()
    }

    pub fn find(&self, label: &str) -> Option<&TimeWindow> {
        self.windows.iter().find(|window| window.label() == label)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl Default for SlotCatalog {
    fn default() -> Self {
        SlotCatalog::standard()
    }
}
