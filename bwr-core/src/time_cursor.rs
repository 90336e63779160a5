//! Year/month time control for the historical and forecast map.
//!
//! The slider covers January 2020 through January 2026, one step per month.
//! Each committed change yields exactly one tile template update and one
//! GeoJSON fetch for the new month.

use crate::config::ApiConfig;
use crate::error::{BwrError, Result};
use crate::request::{RequestToken, RequestTracker};
use bwr_utils::months;

pub const MIN_YEAR: i32 = 2020;
pub const MAX_YEAR: i32 = 2026;
/// Number of slider positions.
pub const SLIDER_UNITS: usize = ((MAX_YEAR - MIN_YEAR) * 12 + 1) as usize;
/// Year highlighted on the slider as the boundary between history and forecast.
pub const PIVOT_YEAR: i32 = 2025;

/// A selected year and 1-based month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeCursor {
    year: i32,
    month: u32,
}

impl TimeCursor {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let cursor = Self { year, month };
        if !(1..=12).contains(&month) || year < MIN_YEAR || cursor.index() >= SLIDER_UNITS {
            return Err(BwrError::InvalidTimeCursor { year, month });
        }
        Ok(cursor)
    }

    /// Build from a Bulgarian month name, e.g. `(2025, "Март")`.
    pub fn from_month_label(year: i32, label: &str) -> Result<Self> {
        let month =
            months::month_number(label).ok_or_else(|| BwrError::UnknownMonth(label.to_string()))?;
        Self::new(year, month)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= SLIDER_UNITS {
            return None;
        }
        Some(Self {
            year: MIN_YEAR + (index / 12) as i32,
            month: (index % 12) as u32 + 1,
        })
    }

    pub fn index(&self) -> usize {
        ((self.year - MIN_YEAR) * 12) as usize + (self.month - 1) as usize
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn month_name(&self) -> &'static str {
        months::month_name(self.month).unwrap_or_default()
    }

    /// e.g. "Март 2025"
    pub fn label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    pub fn tile_template(&self, config: &ApiConfig) -> String {
        format!(
            "{}/tiles/{}/{}/{}/{{z}}/{{x}}/{{y}}.png",
            config.tile_base_url, config.tile_dataset, self.year, self.month
        )
    }

    pub fn geojson_url(&self, config: &ApiConfig) -> String {
        format!(
            "{}/tiles/{}/{}/{}/geojson",
            config.tile_base_url, config.tile_dataset, self.year, self.month
        )
    }
}

impl Default for TimeCursor {
    fn default() -> Self {
        Self {
            year: PIVOT_YEAR,
            month: 1,
        }
    }
}

/// The two dependent requests for one time cursor value.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeFetch {
    pub cursor: TimeCursor,
    pub tile_template: String,
    pub geojson_url: String,
    pub token: RequestToken,
}

/// Tracks the committed cursor and issues fetches on change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeControl {
    current: Option<TimeCursor>,
    tracker: RequestTracker,
}

impl TimeControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<TimeCursor> {
        self.current
    }

    /// Commit a cursor value. Returns the fetch to issue, or `None` when the
    /// value did not change.
    pub fn set(&mut self, cursor: TimeCursor, config: &ApiConfig) -> Option<TimeFetch> {
        if self.current == Some(cursor) {
            return None;
        }
        self.current = Some(cursor);
        Some(TimeFetch {
            cursor,
            tile_template: cursor.tile_template(config),
            geojson_url: cursor.geojson_url(config),
            token: self.tracker.issue(),
        })
    }

    /// Whether a GeoJSON response for `token` should still be drawn.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.tracker.is_current(token)
    }

    /// Forget the committed value (leaving the mode), staling pending fetches.
    pub fn reset(&mut self) {
        self.current = None;
        self.tracker.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_range() {
        assert_eq!(SLIDER_UNITS, 73);
        assert_eq!(TimeCursor::from_index(0), TimeCursor::new(2020, 1).ok());
        assert_eq!(TimeCursor::from_index(72), TimeCursor::new(2026, 1).ok());
        assert_eq!(TimeCursor::from_index(73), None);
        assert!(TimeCursor::new(2026, 2).is_err());
        assert!(TimeCursor::new(2019, 12).is_err());
        assert!(TimeCursor::new(2021, 13).is_err());
    }

    #[test]
    fn test_index_round_trip_and_label() {
        let cursor = TimeCursor::from_month_label(2025, "Март").unwrap();
        assert_eq!((cursor.year(), cursor.month()), (2025, 3));
        assert_eq!(TimeCursor::from_index(cursor.index()), Some(cursor));
        assert_eq!(cursor.label(), "Март 2025");
        assert!(matches!(
            TimeCursor::from_month_label(2025, "Mar"),
            Err(BwrError::UnknownMonth(_))
        ));
    }

    #[test]
    fn test_one_fetch_per_change() {
        let config = ApiConfig::default();
        let mut control = TimeControl::new();

        let march = TimeCursor::from_month_label(2025, "Март").unwrap();
        let fetch = control.set(march, &config).unwrap();
        assert_eq!(
            fetch.tile_template,
            "http://localhost:8001/tiles/dam1/2025/3/{z}/{x}/{y}.png"
        );
        assert_eq!(fetch.geojson_url, "http://localhost:8001/tiles/dam1/2025/3/geojson");

        // Same value again issues nothing.
        assert_eq!(control.set(march, &config), None);

        // Changing only the month re-issues both.
        let april = TimeCursor::new(2025, 4).unwrap();
        let next = control.set(april, &config).unwrap();
        assert!(next.tile_template.contains("/2025/4/"));
        assert!(next.geojson_url.ends_with("/2025/4/geojson"));
        assert!(!control.is_current(fetch.token));
        assert!(control.is_current(next.token));
    }

    #[test]
    fn test_reset_stales_pending_fetch() {
        let config = ApiConfig::default();
        let mut control = TimeControl::new();
        let fetch = control.set(TimeCursor::default(), &config).unwrap();
        control.reset();
        assert!(!control.is_current(fetch.token));
        assert_eq!(control.current(), None);
        assert!(control.set(TimeCursor::default(), &config).is_some());
    }
}
