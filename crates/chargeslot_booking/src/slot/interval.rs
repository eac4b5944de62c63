use jiff::civil::DateTime;
use serde::Serialize;

/// Half-open `[start, end)` interval in station-local civil time.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilInterval {
    start: DateTime,
    end: DateTime,
}

impl CivilInterval {
    pub fn new(start: DateTime, end: DateTime) -> Self {
        CivilInterval { start, end }
    }

    pub fn start(&self) -> DateTime {
        self.start
    }

    pub fn end(&self) -> DateTime {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Touching bounds do not overlap.
    pub fn overlaps(&self, other: &CivilInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}
