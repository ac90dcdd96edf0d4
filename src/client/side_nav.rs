use std::fmt;

use super::error::ClientError;

/// Options offered by the region dropdown, in display order
pub const STATE_OPTIONS: [&str; 5] = ["All", "VIC", "NSW", "SA", "QLD"];

/// Client-side marker filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StateFilter {
    #[default]
    All,
    State(String),
}

impl StateFilter {
    /// Parse a dropdown value; anything outside [`STATE_OPTIONS`] is rejected
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "All" => Some(StateFilter::All),
            other if STATE_OPTIONS.contains(&other) => Some(StateFilter::State(other.to_string())),
            _ => None,
        }
    }

    pub fn matches(&self, station_state: &str) -> bool {
        match self {
            StateFilter::All => true,
            StateFilter::State(state) => state == station_state,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StateFilter::All => "All",
            StateFilter::State(state) => state,
        }
    }
}

impl fmt::Display for StateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter sidebar: one selected region, default "All"
#[derive(Debug, Clone, Default)]
pub struct SideNav {
    selected: StateFilter,
}

impl SideNav {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &StateFilter {
        &self.selected
    }

    pub fn options(&self) -> &'static [&'static str] {
        &STATE_OPTIONS
    }

    /// Handle a dropdown change
    ///
    /// Returns the filter the parent should apply, or `None` when the value
    /// did not change.
    pub fn change(&mut self, value: &str) -> Result<Option<StateFilter>, ClientError> {
        let filter =
            StateFilter::parse(value).ok_or_else(|| ClientError::UnknownRegion(value.to_string()))?;

        if filter == self.selected {
            return Ok(None);
        }

        self.selected = filter.clone();
        Ok(Some(filter))
    }
}
